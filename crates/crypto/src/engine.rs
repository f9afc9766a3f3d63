//! Configuration-driven front end for chain construction and verification.
//!
//! [`ChainEngine`] picks the digest from [`ChainConfig`], refuses requests
//! beyond the configured limits before doing any hashing, and counts what it
//! does. It never holds chain data, so one engine can be shared by many
//! threads building unrelated chains.

use std::sync::atomic::{AtomicU64, Ordering};

use shachain_core::{ChainConfig, ChainElement, DigestAlgorithm, Verification};
use tracing::{debug, warn};

use crate::chain::{Blake3Chain, ChainError, Sha256Chain};
use crate::verify::verify_element_for;
use crate::waypoint::WaypointChain;

/// Counters for engine operations.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    chains_built_total: AtomicU64,
    digest_evaluations_total: AtomicU64,
    verifications_total: AtomicU64,
    verification_failures_total: AtomicU64,
    requests_rejected_total: AtomicU64,
}

/// Point-in-time copy of [`EngineMetrics`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Chains built, with or without waypoints
    pub chains_built_total: u64,
    /// Digest evaluations spent building and verifying
    pub digest_evaluations_total: u64,
    /// Verification calls, including rejected ones
    pub verifications_total: u64,
    /// Verifications that returned `Invalid`
    pub verification_failures_total: u64,
    /// Requests refused by a configured limit
    pub requests_rejected_total: u64,
}

impl EngineMetrics {
    fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            chains_built_total: self.chains_built_total.load(Ordering::Relaxed),
            digest_evaluations_total: self.digest_evaluations_total.load(Ordering::Relaxed),
            verifications_total: self.verifications_total.load(Ordering::Relaxed),
            verification_failures_total: self.verification_failures_total.load(Ordering::Relaxed),
            requests_rejected_total: self.requests_rejected_total.load(Ordering::Relaxed),
        }
    }
}

/// Builds and verifies chains according to a [`ChainConfig`].
#[derive(Debug)]
pub struct ChainEngine {
    config: ChainConfig,
    metrics: EngineMetrics,
}

impl ChainEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: ChainConfig) -> Result<Self, ChainError> {
        config.validate()?;
        debug!(
            digest = %config.digest,
            waypoint_capacity = config.waypoint_capacity,
            max_elements = config.max_elements,
            "chain engine configured"
        );
        Ok(Self {
            config,
            metrics: EngineMetrics::default(),
        })
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.config.digest
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn check_length(&self, elements: u64) -> Result<(), ChainError> {
        if elements > self.config.max_elements {
            EngineMetrics::add(&self.metrics.requests_rejected_total, 1);
            warn!(
                elements,
                limit = self.config.max_elements,
                "chain build rejected: too many elements"
            );
            return Err(ChainError::ChainTooLong {
                elements,
                limit: self.config.max_elements,
            });
        }
        Ok(())
    }

    fn record_build(&self, elements: u64) {
        EngineMetrics::add(&self.metrics.chains_built_total, 1);
        EngineMetrics::add(&self.metrics.digest_evaluations_total, elements);
    }

    /// Builds a chain with the configured digest and returns its tail.
    pub fn build_chain(&self, seed: &[u8], elements: u64) -> Result<ChainElement, ChainError> {
        self.check_length(elements)?;
        let tail = match self.config.digest {
            DigestAlgorithm::Sha256 => Sha256Chain::build(seed, elements)?,
            DigestAlgorithm::Blake3 => Blake3Chain::build(seed, elements)?,
        };
        self.record_build(elements);
        Ok(tail)
    }

    /// Builds a chain keeping the configured number of waypoints.
    pub fn build_chain_with_waypoints(
        &self,
        seed: &[u8],
        elements: u64,
    ) -> Result<WaypointChain, ChainError> {
        self.build_chain_with_capacity(seed, elements, self.config.waypoint_capacity)
    }

    /// Builds a chain keeping at most `capacity` waypoints.
    pub fn build_chain_with_capacity(
        &self,
        seed: &[u8],
        elements: u64,
        capacity: usize,
    ) -> Result<WaypointChain, ChainError> {
        self.check_length(elements)?;
        let chain = match self.config.digest {
            DigestAlgorithm::Sha256 => Sha256Chain::build_with_waypoints(seed, elements, capacity)?,
            DigestAlgorithm::Blake3 => Blake3Chain::build_with_waypoints(seed, elements, capacity)?,
        };
        self.record_build(elements);
        Ok(chain)
    }

    /// Verifies `element` against a reference `distance` steps ahead, using
    /// `algorithm`. Distances above the configured limit are refused without
    /// hashing and reported as `Invalid`.
    fn verify_with(
        &self,
        algorithm: DigestAlgorithm,
        element: &ChainElement,
        element_index: u64,
        reference: &ChainElement,
        distance: u64,
    ) -> Verification {
        EngineMetrics::add(&self.metrics.verifications_total, 1);

        if distance > self.config.max_verify_distance {
            EngineMetrics::add(&self.metrics.requests_rejected_total, 1);
            EngineMetrics::add(&self.metrics.verification_failures_total, 1);
            warn!(
                element_index,
                distance,
                limit = self.config.max_verify_distance,
                "verification rejected: distance over limit"
            );
            return Verification::Invalid;
        }

        let result = verify_element_for(algorithm, element, element_index, reference, distance);
        EngineMetrics::add(&self.metrics.digest_evaluations_total, distance);
        if !result.is_valid() {
            EngineMetrics::add(&self.metrics.verification_failures_total, 1);
        }
        result
    }

    /// Verifies `element` against a reference `distance` steps ahead.
    pub fn verify_element(
        &self,
        element: &ChainElement,
        element_index: u64,
        reference: &ChainElement,
        distance: u64,
    ) -> Verification {
        self.verify_with(self.config.digest, element, element_index, reference, distance)
    }

    /// Verifies `element` against the tail of a chain of `chain_length`.
    pub fn verify_against_tail(
        &self,
        element: &ChainElement,
        element_index: u64,
        tail: &ChainElement,
        chain_length: u64,
    ) -> Verification {
        if element_index >= chain_length {
            EngineMetrics::add(&self.metrics.verifications_total, 1);
            EngineMetrics::add(&self.metrics.verification_failures_total, 1);
            return Verification::Invalid;
        }
        let distance = chain_length - 1 - element_index;
        self.verify_element(element, element_index, tail, distance)
    }

    /// Verifies `element` against the closest reference retained in `chain`,
    /// using the digest the chain was built with.
    pub fn verify_with_waypoints(
        &self,
        chain: &WaypointChain,
        element: &ChainElement,
        element_index: u64,
    ) -> Verification {
        match chain.reference_for(element_index) {
            Some((reference, distance)) => {
                self.verify_with(chain.algorithm(), element, element_index, &reference, distance)
            }
            None => {
                EngineMetrics::add(&self.metrics.verifications_total, 1);
                EngineMetrics::add(&self.metrics.verification_failures_total, 1);
                Verification::Invalid
            }
        }
    }
}

impl Default for ChainEngine {
    fn default() -> Self {
        Self {
            config: ChainConfig::default(),
            metrics: EngineMetrics::default(),
        }
    }
}
