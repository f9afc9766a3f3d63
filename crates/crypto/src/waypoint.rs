//! Waypoint sampling policy and the owned result of a waypoint build.
//!
//! The policy is fixed and must stay bit-compatible with existing verifiers:
//!
//! - `capacity >= elements`: every element is a waypoint (stride 1).
//! - otherwise `stride = elements / capacity` with truncating division and
//!   waypoint `k` sits at `k * stride` for `k < capacity`.
//!
//! With a sparse plan the last waypoint is `(capacity - 1) * stride`, which
//! is usually not the tail. The tail is always reported on its own.

use serde::{Deserialize, Serialize};
use shachain_core::{ChainElement, DigestAlgorithm, Verification, Waypoint};

use crate::chain::ChainError;
use crate::verify::verify_element_for;

/// Where waypoints fall for a chain of a given length and capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointPlan {
    elements: u64,
    capacity: usize,
    stride: u64,
    count: usize,
}

impl WaypointPlan {
    pub fn new(elements: u64, capacity: usize) -> Result<Self, ChainError> {
        if elements == 0 {
            return Err(ChainError::EmptyChain);
        }
        if capacity == 0 {
            return Err(ChainError::ZeroWaypointCapacity);
        }

        let capacity_u64 = u64::try_from(capacity).unwrap_or(u64::MAX);
        let (stride, count) = if capacity_u64 >= elements {
            // elements <= capacity, so it fits in usize
            (1, usize::try_from(elements).unwrap_or(capacity))
        } else {
            (elements / capacity_u64, capacity)
        };

        Ok(Self {
            elements,
            capacity,
            stride,
            count,
        })
    }

    pub fn elements(&self) -> u64 {
        self.elements
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Distance between consecutive waypoints.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of waypoints the plan records.
    pub fn count(&self) -> usize {
        self.count
    }

    /// True when every element of the chain is recorded.
    pub fn is_full_capture(&self) -> bool {
        self.count as u64 == self.elements
    }

    /// Chain index of waypoint `k`, or `None` past the last waypoint.
    pub fn index_of(&self, k: usize) -> Option<u64> {
        if k < self.count {
            Some(k as u64 * self.stride)
        } else {
            None
        }
    }

    /// Whether chain index `index` is recorded as a waypoint.
    pub fn is_waypoint(&self, index: u64) -> bool {
        index % self.stride == 0 && index / self.stride < self.count as u64
    }

    /// Chain index of the last recorded waypoint.
    pub fn last_index(&self) -> u64 {
        (self.count as u64 - 1) * self.stride
    }
}

/// Tail and waypoints produced by a single waypoint build.
///
/// Deserialized values are checked against the same shape a build produces:
/// a non-empty chain, a positive stride and strictly increasing waypoint
/// indices inside the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWaypointChain")]
pub struct WaypointChain {
    algorithm: DigestAlgorithm,
    length: u64,
    stride: u64,
    tail: ChainElement,
    waypoints: Vec<Waypoint>,
}

impl WaypointChain {
    pub(crate) fn new(
        algorithm: DigestAlgorithm,
        length: u64,
        stride: u64,
        tail: ChainElement,
        waypoints: Vec<Waypoint>,
    ) -> Self {
        Self {
            algorithm,
            length,
            stride,
            tail,
            waypoints,
        }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Number of elements in the chain.
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn tail(&self) -> ChainElement {
        self.tail
    }

    /// Always `length - 1`.
    pub fn tail_index(&self) -> u64 {
        self.length - 1
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoints_used(&self) -> usize {
        self.waypoints.len()
    }

    /// True when every chain element was recorded as a waypoint.
    pub fn is_full_capture(&self) -> bool {
        self.waypoints.len() as u64 == self.length
    }

    /// First waypoint whose index is `>= index`, found by binary search.
    pub fn nearest_at_or_above(&self, index: u64) -> Option<&Waypoint> {
        let pos = self.waypoints.partition_point(|w| w.index < index);
        self.waypoints.get(pos)
    }

    /// Reference element and distance to check an element at `index`
    /// against: the nearest waypoint at or above it, else the tail.
    ///
    /// `None` when `index` lies outside the chain.
    pub fn reference_for(&self, index: u64) -> Option<(ChainElement, u64)> {
        if index >= self.length {
            return None;
        }
        match self.nearest_at_or_above(index) {
            Some(waypoint) => Some((waypoint.element, waypoint.index - index)),
            None => Some((self.tail, self.tail_index() - index)),
        }
    }

    /// Checks `element` against the closest retained reference.
    ///
    /// Costs at most `stride` digest evaluations, plus the gap between the
    /// last waypoint and the tail for indices beyond the last waypoint.
    pub fn verify(&self, element: &ChainElement, index: u64) -> Verification {
        match self.reference_for(index) {
            Some((reference, distance)) => {
                verify_element_for(self.algorithm, element, index, &reference, distance)
            }
            None => Verification::Invalid,
        }
    }

    pub fn into_parts(self) -> (ChainElement, Vec<Waypoint>) {
        (self.tail, self.waypoints)
    }
}

/// Unchecked wire form of [`WaypointChain`].
#[derive(Deserialize)]
struct RawWaypointChain {
    algorithm: DigestAlgorithm,
    length: u64,
    stride: u64,
    tail: ChainElement,
    waypoints: Vec<Waypoint>,
}

impl TryFrom<RawWaypointChain> for WaypointChain {
    type Error = ChainError;

    fn try_from(raw: RawWaypointChain) -> Result<Self, Self::Error> {
        let malformed = |reason: String| ChainError::MalformedWaypoints { reason };

        if raw.length == 0 {
            return Err(malformed("length must be at least 1".to_string()));
        }
        if raw.stride == 0 {
            return Err(malformed("stride must be at least 1".to_string()));
        }
        if raw.waypoints.len() as u64 > raw.length {
            return Err(malformed(format!(
                "{} waypoints for a chain of {} elements",
                raw.waypoints.len(),
                raw.length
            )));
        }
        if let Some(pair) = raw.waypoints.windows(2).find(|p| p[0].index >= p[1].index) {
            return Err(malformed(format!(
                "waypoint index {} does not follow {}",
                pair[1].index, pair[0].index
            )));
        }
        if let Some(last) = raw.waypoints.last() {
            if last.index >= raw.length {
                return Err(malformed(format!(
                    "waypoint index {} outside chain of {} elements",
                    last.index, raw.length
                )));
            }
        }

        Ok(Self::new(
            raw.algorithm,
            raw.length,
            raw.stride,
            raw.tail,
            raw.waypoints,
        ))
    }
}
