//! One-way hash chains with sparse waypoints.
//!
//! A chain owner hashes a seed repeatedly, keeps the final ("tail") element
//! and can later prove that any revealed element sits at a given position,
//! because only the owner can run the chain backwards. This crate provides:
//!
//! - **Construction**: tail-only builds in constant memory, and builds that
//!   also sample a bounded set of indexed waypoints
//! - **Verification**: forward re-hashing from a revealed element to a tail
//!   or waypoint, compared in constant time
//! - **Lazy walks**: restartable iterators over consecutive chain elements
//! - **Digests**: SHA-256 (reference), BLAKE3, and HMAC-SHA256
//! - **Engine**: configuration-driven limits and counters for services
//!
//! # Example
//!
//! ```
//! use shachain_crypto::{build_chain_with_waypoints, element_at};
//!
//! let chain = build_chain_with_waypoints(b"seed", 1000, 10).unwrap();
//! assert_eq!(chain.stride(), 100);
//! assert_eq!(chain.tail_index(), 999);
//!
//! let revealed = element_at(b"seed", 437).unwrap();
//! assert!(chain.verify(&revealed, 437).is_valid());
//! ```
//!
//! # Security Notes
//!
//! - Seeds are never logged; log lines carry at most a short element prefix
//! - A walk clears its own scratch slot on drop; elements it yields and the
//!   tails builders return are `Copy` values owned by the caller, who must
//!   `zeroize` them when they are secret
//! - A failed verification is a normal result, not an error

pub mod chain;
pub mod digest;
pub mod engine;
pub mod verify;
pub mod walk;
pub mod waypoint;

#[cfg(test)]
mod chain_bench;

#[cfg(test)]
mod proptests;

#[cfg(test)]
mod test_vectors;

pub use chain::{
    build_chain, build_chain_into, build_chain_with_waypoints, element_at, Blake3Chain,
    ChainError, HashChain, Sha256Chain,
};
pub use digest::{
    hmac_sha256, verify_hmac_sha256, Blake3Digest, ChainDigest, DigestContext, Sha256Digest,
};
pub use engine::{ChainEngine, EngineMetrics, MetricsSnapshot};
pub use verify::{verify_against_tail, verify_element, verify_element_for};
pub use walk::ChainWalk;
pub use waypoint::{WaypointChain, WaypointPlan};

pub use shachain_core::{ChainElement, DigestAlgorithm, Verification, Waypoint, DIGEST_LENGTH};
