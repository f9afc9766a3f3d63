//! Chain element and waypoint types.
//!
//! A chain element is exactly [`DIGEST_LENGTH`] raw bytes with no encoding or
//! length prefix. Text forms (Display, serde) use lowercase hex.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Digest size in bytes used for every chain element.
pub const DIGEST_LENGTH: usize = 32;

/// Number of leading bytes shown by [`ChainElement::short_hex`].
const SHORT_HEX_BYTES: usize = 8;

/// A single element of a hash chain.
///
/// Equality is evaluated in constant time over all 32 bytes. The type is
/// `Copy`: zeroizing one value leaves every other copy untouched.
#[derive(Clone, Copy, Default, Zeroize)]
pub struct ChainElement([u8; DIGEST_LENGTH]);

impl ChainElement {
    /// Wraps raw digest bytes.
    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Copies an element out of a slice, rejecting any length other than 32.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; DIGEST_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidElement {
                reason: format!("expected {} bytes, got {}", DIGEST_LENGTH, bytes.len()),
            })?;
        Ok(Self(array))
    }

    /// Decodes an element from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::InvalidElement {
            reason: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; DIGEST_LENGTH] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Hex of the leading bytes, for log lines.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..SHORT_HEX_BYTES])
    }
}

impl ConstantTimeEq for ChainElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for ChainElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ChainElement {}

impl From<[u8; DIGEST_LENGTH]> for ChainElement {
    fn from(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl From<ChainElement> for [u8; DIGEST_LENGTH] {
    fn from(element: ChainElement) -> Self {
        element.0
    }
}

impl AsRef<[u8]> for ChainElement {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ChainElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainElement({})", self.to_hex())
    }
}

impl fmt::Display for ChainElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ChainElement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for ChainElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ChainElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// An element retained at a known chain position to shortcut verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    /// The position of this element in its chain
    pub index: u64,
    /// The element itself
    pub element: ChainElement,
}

impl Waypoint {
    pub fn new(index: u64, element: ChainElement) -> Self {
        Self { index, element }
    }
}

/// Digest function a chain is built with.
///
/// SHA-256 is the reference algorithm; chains built with different
/// algorithms are unrelated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            other => Err(Error::InvalidConfig {
                field: "digest".to_string(),
                reason: format!("unknown digest algorithm '{}'", other),
            }),
        }
    }
}

/// Outcome of checking an element against a reference element.
///
/// `Invalid` covers every mismatch: tampered, fabricated, wrong position or
/// wrong distance are deliberately indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    Valid,
    Invalid,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }
}

impl From<Choice> for Verification {
    fn from(choice: Choice) -> Self {
        if bool::from(choice) {
            Verification::Valid
        } else {
            Verification::Invalid
        }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Valid => write!(f, "valid"),
            Verification::Invalid => write!(f, "invalid"),
        }
    }
}
