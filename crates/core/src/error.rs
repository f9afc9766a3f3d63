//! Core error types

use thiserror::Error;

/// Core error type for shachain
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range
    #[error("Invalid config field '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    /// A chain element could not be decoded
    #[error("Invalid chain element: {reason}")]
    InvalidElement { reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML decoding error
    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result alias using the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
