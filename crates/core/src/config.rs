//! Configuration management for shachain.

use serde::{Deserialize, Serialize};
#[cfg(feature = "toml")]
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::DigestAlgorithm;

/// Default number of waypoints retained per chain.
pub const DEFAULT_WAYPOINT_CAPACITY: usize = 1024;

/// Default upper bound on chain length (2^32 elements).
pub const DEFAULT_MAX_ELEMENTS: u64 = 1 << 32;

/// Default upper bound on forward hashing during one verification.
pub const DEFAULT_MAX_VERIFY_DISTANCE: u64 = 1 << 32;

/// Settings consumed by the chain engine.
///
/// Every field has a default, so a partial TOML document is accepted:
///
/// ```toml
/// digest = "blake3"
/// waypoint_capacity = 4096
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Digest function chains are built with
    pub digest: DigestAlgorithm,
    /// Waypoints retained when the caller does not ask for a specific number
    pub waypoint_capacity: usize,
    /// Longest chain the engine agrees to build
    pub max_elements: u64,
    /// Longest forward walk a single verification may perform
    pub max_verify_distance: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl ChainConfig {
    pub fn default_config() -> Self {
        Self {
            digest: DigestAlgorithm::Sha256,
            waypoint_capacity: DEFAULT_WAYPOINT_CAPACITY,
            max_elements: DEFAULT_MAX_ELEMENTS,
            max_verify_distance: DEFAULT_MAX_VERIFY_DISTANCE,
        }
    }

    /// Checks that every limit is usable.
    pub fn validate(&self) -> Result<()> {
        if self.waypoint_capacity == 0 {
            return Err(Error::InvalidConfig {
                field: "waypoint_capacity".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_elements == 0 {
            return Err(Error::InvalidConfig {
                field: "max_elements".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_verify_distance == 0 {
            return Err(Error::InvalidConfig {
                field: "max_verify_distance".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        Ok(config)
    }
}
