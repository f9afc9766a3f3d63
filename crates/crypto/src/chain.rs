//! Hash Chain Module - one-way chains of repeated digests
//!
//! A chain rooted at a seed is the sequence
//!
//! ```text
//! e[0] = H(seed)
//! e[i] = H(e[i-1])        for 1 <= i < n
//! ```
//!
//! The owner publishes the tail `e[n-1]` and later reveals earlier elements
//! in reverse order. Anyone holding the tail (or a waypoint above the
//! revealed position) can check a revealed element by hashing it forward.
//!
//! # Memory
//!
//! Construction is streaming: the builder keeps one element of scratch state
//! no matter how long the chain is. The only output that grows with the
//! chain is the waypoint buffer, and that is bounded by the caller-chosen
//! capacity.
//!
//! # Performance
//!
//! Building a chain of `n` elements costs exactly `n` digest evaluations.

use std::marker::PhantomData;

use shachain_core::{ChainElement, Waypoint};
use thiserror::Error;
use tracing::debug;

use crate::digest::{Blake3Digest, ChainDigest, Sha256Digest};
use crate::walk::ChainWalk;
use crate::waypoint::{WaypointChain, WaypointPlan};

/// Errors that can occur in chain operations.
///
/// All of them are raised before any hashing starts.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Empty chain: a chain needs at least one element")]
    EmptyChain,

    #[error("Waypoint capacity must be at least 1")]
    ZeroWaypointCapacity,

    #[error("Chain too long: {elements} elements requested, limit is {limit}")]
    ChainTooLong { elements: u64, limit: u64 },

    #[error("Chain index {index} cannot be addressed")]
    IndexOverflow { index: u64 },

    #[error("Malformed waypoint chain: {reason}")]
    MalformedWaypoints { reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] shachain_core::Error),
}

/// Chain operations over a particular digest.
///
/// `HashChain` carries no state; it only fixes the digest used by its
/// associated functions.
pub struct HashChain<D: ChainDigest = Sha256Digest>(PhantomData<fn() -> D>);

/// Chains over SHA-256.
pub type Sha256Chain = HashChain<Sha256Digest>;

/// Chains over BLAKE3.
pub type Blake3Chain = HashChain<Blake3Digest>;

impl<D: ChainDigest> HashChain<D> {
    /// Builds the chain rooted at `seed` and returns its tail `e[elements - 1]`.
    pub fn build(seed: &[u8], elements: u64) -> Result<ChainElement, ChainError> {
        if elements == 0 {
            return Err(ChainError::EmptyChain);
        }

        debug!(algorithm = %D::ALGORITHM, elements, "building hash chain");
        let tail = ChainWalk::<D>::from_seed(seed, elements)
            .finish()
            .ok_or(ChainError::EmptyChain)?;
        debug!(
            algorithm = %D::ALGORITHM,
            elements,
            tail = %tail.short_hex(),
            "hash chain built"
        );

        Ok(tail)
    }

    /// Recomputes the single element `e[index]` of the chain rooted at `seed`.
    pub fn element_at(seed: &[u8], index: u64) -> Result<ChainElement, ChainError> {
        let elements = index
            .checked_add(1)
            .ok_or(ChainError::IndexOverflow { index })?;
        ChainWalk::<D>::from_seed(seed, elements)
            .finish()
            .ok_or(ChainError::EmptyChain)
    }

    /// Builds the chain and records waypoints into `out`.
    ///
    /// The length of `out` is the waypoint capacity. Returns the tail and
    /// the number of waypoints written to the front of `out`; the rest of
    /// the slice is left untouched.
    pub fn build_into(
        seed: &[u8],
        elements: u64,
        out: &mut [Waypoint],
    ) -> Result<(ChainElement, usize), ChainError> {
        let plan = WaypointPlan::new(elements, out.len())?;
        let mut used = 0;
        let tail = Self::sample(seed, &plan, |waypoint| {
            out[used] = waypoint;
            used += 1;
        });
        Ok((tail, used))
    }

    /// Builds the chain and returns the tail together with an owned set of
    /// at most `capacity` waypoints.
    pub fn build_with_waypoints(
        seed: &[u8],
        elements: u64,
        capacity: usize,
    ) -> Result<WaypointChain, ChainError> {
        let plan = WaypointPlan::new(elements, capacity)?;
        let mut waypoints = Vec::with_capacity(plan.count());
        let tail = Self::sample(seed, &plan, |waypoint| waypoints.push(waypoint));
        Ok(WaypointChain::new(D::ALGORITHM, elements, plan.stride(), tail, waypoints))
    }

    /// Walks the whole chain once, handing every planned waypoint to `store`
    /// in index order, and returns the tail.
    fn sample<F>(seed: &[u8], plan: &WaypointPlan, mut store: F) -> ChainElement
    where
        F: FnMut(Waypoint),
    {
        debug!(
            algorithm = %D::ALGORITHM,
            elements = plan.elements(),
            capacity = plan.capacity(),
            stride = plan.stride(),
            "building hash chain with waypoints"
        );

        let mut recorded = 0;
        let mut next_waypoint = plan.index_of(0);
        let mut tail = ChainElement::default();

        for (index, element) in ChainWalk::<D>::from_seed(seed, plan.elements()) {
            if next_waypoint == Some(index) {
                store(Waypoint::new(index, element));
                recorded += 1;
                next_waypoint = plan.index_of(recorded);
            }
            tail = element;
        }

        debug!(
            algorithm = %D::ALGORITHM,
            elements = plan.elements(),
            waypoints_used = recorded,
            tail = %tail.short_hex(),
            "hash chain built"
        );
        tail
    }
}

/// Builds a SHA-256 chain and returns its tail.
///
/// # Example
/// ```
/// use shachain_crypto::{build_chain, verify_element};
///
/// let tail = build_chain(b"seed", 5).unwrap();
/// let e2 = shachain_crypto::element_at(b"seed", 2).unwrap();
/// assert!(verify_element(&e2, 2, &tail, 2).is_valid());
/// ```
pub fn build_chain(seed: &[u8], elements: u64) -> Result<ChainElement, ChainError> {
    Sha256Chain::build(seed, elements)
}

/// Builds a SHA-256 chain and samples up to `capacity` waypoints.
///
/// If `capacity >= elements` every element is kept. Otherwise
/// `stride = elements / capacity` (truncating) and waypoint `k` sits at
/// index `k * stride`, so the tail is generally not among the waypoints.
pub fn build_chain_with_waypoints(
    seed: &[u8],
    elements: u64,
    capacity: usize,
) -> Result<WaypointChain, ChainError> {
    Sha256Chain::build_with_waypoints(seed, elements, capacity)
}

/// Builds a SHA-256 chain, writing waypoints into a caller-owned buffer.
pub fn build_chain_into(
    seed: &[u8],
    elements: u64,
    out: &mut [Waypoint],
) -> Result<(ChainElement, usize), ChainError> {
    Sha256Chain::build_into(seed, elements, out)
}

/// Recomputes `e[index]` of a SHA-256 chain.
pub fn element_at(seed: &[u8], index: u64) -> Result<ChainElement, ChainError> {
    Sha256Chain::element_at(seed, index)
}
