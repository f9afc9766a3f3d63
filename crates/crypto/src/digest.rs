//! Digest collaborators for hash chains.
//!
//! The chain algorithms only need a fixed 32-byte digest with a streaming
//! interface. [`ChainDigest`] captures that contract; SHA-256 is the
//! reference implementation and BLAKE3 is available as a faster alternative.
//! Each call creates its own context, so no hasher state is ever shared
//! between concurrent chain operations.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use shachain_core::{ChainElement, DigestAlgorithm, DIGEST_LENGTH};

/// Streaming state of one digest computation.
pub trait DigestContext {
    /// Absorbs more input.
    fn update(&mut self, data: &[u8]);

    /// Consumes the context and produces the 32-byte digest.
    fn finalize(self) -> ChainElement;
}

/// A 32-byte cryptographic digest usable as a chain step.
pub trait ChainDigest {
    /// Streaming context created by [`ChainDigest::init`].
    type Context: DigestContext;

    /// Identifier recorded alongside chains built with this digest.
    const ALGORITHM: DigestAlgorithm;

    /// Starts a fresh digest computation.
    fn init() -> Self::Context;

    /// One-shot digest of `data`.
    fn digest(data: &[u8]) -> ChainElement {
        let mut ctx = Self::init();
        ctx.update(data);
        ctx.finalize()
    }
}

/// SHA-256 (FIPS 180-4), the reference chain digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl DigestContext for Sha256 {
    fn update(&mut self, data: &[u8]) {
        sha2::Digest::update(self, data);
    }

    fn finalize(self) -> ChainElement {
        let bytes: [u8; DIGEST_LENGTH] = sha2::Digest::finalize(self).into();
        ChainElement::new(bytes)
    }
}

impl ChainDigest for Sha256Digest {
    type Context = Sha256;
    const ALGORITHM: DigestAlgorithm = DigestAlgorithm::Sha256;

    fn init() -> Sha256 {
        <Sha256 as sha2::Digest>::new()
    }
}

/// BLAKE3 in its default 32-byte output mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Digest;

impl DigestContext for blake3::Hasher {
    fn update(&mut self, data: &[u8]) {
        blake3::Hasher::update(self, data);
    }

    fn finalize(self) -> ChainElement {
        ChainElement::new(*blake3::Hasher::finalize(&self).as_bytes())
    }
}

impl ChainDigest for Blake3Digest {
    type Context = blake3::Hasher;
    const ALGORITHM: DigestAlgorithm = DigestAlgorithm::Blake3;

    fn init() -> blake3::Hasher {
        blake3::Hasher::new()
    }
}

type HmacSha256 = Hmac<Sha256>;

fn hmac_sha256_context(key: &[u8], message: &[u8]) -> HmacSha256 {
    // HMAC accepts keys of any length; oversized keys are hashed first.
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts keys of any length"));
    mac.update(message);
    mac
}

/// Computes HMAC-SHA256 (RFC 2104) of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; DIGEST_LENGTH] {
    hmac_sha256_context(key, message).finalize().into_bytes().into()
}

/// Checks an HMAC-SHA256 tag in constant time.
pub fn verify_hmac_sha256(key: &[u8], message: &[u8], tag: &[u8]) -> bool {
    hmac_sha256_context(key, message).verify_slice(tag).is_ok()
}
