//! Core types for the shachain hash-chain workspace.
//!
//! This crate holds the pieces every other crate in the workspace agrees on:
//! the fixed-size chain element, indexed waypoints, the digest algorithm
//! identifier, configuration and the shared error type. It contains no
//! hashing logic of its own; see `shachain-crypto` for chain construction
//! and verification.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::ChainConfig;
pub use error::{Error, Result};
pub use types::{ChainElement, DigestAlgorithm, Verification, Waypoint, DIGEST_LENGTH};
