//! Verification of revealed chain elements.
//!
//! An element claimed to sit at position `i` is accepted iff hashing it
//! forward `distance` times reproduces a reference element known to sit at
//! `i + distance`. The final comparison is constant time. A mismatch is the
//! routine negative answer and is reported as [`Verification::Invalid`],
//! never as an error.
//!
//! Nothing here searches a waypoint table; callers pick the reference and
//! distance (see [`crate::WaypointChain::reference_for`]).

use shachain_core::{ChainElement, DigestAlgorithm, Verification};
use subtle::ConstantTimeEq;
use tracing::trace;

use crate::chain::{Blake3Chain, HashChain, Sha256Chain};
use crate::digest::ChainDigest;
use crate::walk::ChainWalk;

impl<D: ChainDigest> HashChain<D> {
    /// Hashes `element` forward `distance` times and compares the result
    /// with `reference`. Costs exactly `distance` digest evaluations.
    pub fn verify_element(
        element: &ChainElement,
        element_index: u64,
        reference: &ChainElement,
        distance: u64,
    ) -> Verification {
        let recomputed = ChainWalk::<D>::from_checkpoint(*element, element_index, distance)
            .finish()
            .unwrap_or(*element);
        let result = Verification::from(recomputed.ct_eq(reference));

        trace!(
            algorithm = %D::ALGORITHM,
            element_index,
            distance,
            %result,
            "chain element checked"
        );
        result
    }

    /// Checks `element` against the tail of a chain of `chain_length`
    /// elements. Indices outside the chain are invalid.
    pub fn verify_against_tail(
        element: &ChainElement,
        element_index: u64,
        tail: &ChainElement,
        chain_length: u64,
    ) -> Verification {
        if element_index >= chain_length {
            trace!(element_index, chain_length, "element index outside chain");
            return Verification::Invalid;
        }
        let distance = chain_length - 1 - element_index;
        Self::verify_element(element, element_index, tail, distance)
    }
}

/// [`HashChain::verify_element`] with the digest picked at runtime.
pub fn verify_element_for(
    algorithm: DigestAlgorithm,
    element: &ChainElement,
    element_index: u64,
    reference: &ChainElement,
    distance: u64,
) -> Verification {
    match algorithm {
        DigestAlgorithm::Sha256 => {
            Sha256Chain::verify_element(element, element_index, reference, distance)
        }
        DigestAlgorithm::Blake3 => {
            Blake3Chain::verify_element(element, element_index, reference, distance)
        }
    }
}

/// Verifies a SHA-256 chain element against a reference `distance` steps
/// ahead of it.
pub fn verify_element(
    element: &ChainElement,
    element_index: u64,
    reference: &ChainElement,
    distance: u64,
) -> Verification {
    Sha256Chain::verify_element(element, element_index, reference, distance)
}

/// Verifies a SHA-256 chain element against the chain's tail.
pub fn verify_against_tail(
    element: &ChainElement,
    element_index: u64,
    tail: &ChainElement,
    chain_length: u64,
) -> Verification {
    Sha256Chain::verify_against_tail(element, element_index, tail, chain_length)
}
