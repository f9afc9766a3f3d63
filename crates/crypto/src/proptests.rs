//! Property-based tests for chain construction and verification.

use proptest::prelude::*;

use crate::chain::{build_chain, build_chain_with_waypoints, element_at};
use crate::digest::{ChainDigest, Sha256Digest};
use crate::verify::verify_element;
use crate::walk::ChainWalk;

fn seed_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: Determinism - the same seed and length give the same tail
    #[test]
    fn prop_build_deterministic(seed in seed_strategy(), n in 1u64..200) {
        prop_assert_eq!(build_chain(&seed, n).unwrap(), build_chain(&seed, n).unwrap());
    }

    /// Property: Recurrence - every element is the digest of its predecessor
    #[test]
    fn prop_recurrence(seed in seed_strategy(), n in 1u64..64) {
        let elements: Vec<_> = ChainWalk::<Sha256Digest>::from_seed(&seed, n).collect();
        prop_assert_eq!(elements[0].1, Sha256Digest::digest(&seed));
        for pair in elements.windows(2) {
            prop_assert_eq!(pair[1].1, Sha256Digest::digest(pair[0].1.as_bytes()));
        }
        prop_assert_eq!(elements.last().unwrap().1, build_chain(&seed, n).unwrap());
    }

    /// Property: Tail consistency - waypoint builds return the plain tail
    #[test]
    fn prop_tail_consistency(seed in seed_strategy(), n in 1u64..300, cap in 1usize..400) {
        let chain = build_chain_with_waypoints(&seed, n, cap).unwrap();
        prop_assert_eq!(chain.tail(), build_chain(&seed, n).unwrap());
        prop_assert_eq!(chain.tail_index(), n - 1);
    }

    /// Property: Sampling - full capture when cap >= n, else k * floor(n / cap)
    #[test]
    fn prop_sampling_policy(seed in seed_strategy(), n in 1u64..300, cap in 1usize..400) {
        let chain = build_chain_with_waypoints(&seed, n, cap).unwrap();
        let all: Vec<_> = ChainWalk::<Sha256Digest>::from_seed(&seed, n).map(|(_, e)| e).collect();

        if cap as u64 >= n {
            prop_assert_eq!(chain.waypoints_used() as u64, n);
            for (k, waypoint) in chain.waypoints().iter().enumerate() {
                prop_assert_eq!(waypoint.index, k as u64);
                prop_assert_eq!(waypoint.element, all[k]);
            }
        } else {
            let stride = n / cap as u64;
            prop_assert_eq!(chain.waypoints_used(), cap);
            for (k, waypoint) in chain.waypoints().iter().enumerate() {
                prop_assert_eq!(waypoint.index, k as u64 * stride);
                prop_assert_eq!(waypoint.element, all[waypoint.index as usize]);
            }
            prop_assert_eq!(chain.waypoints().last().unwrap().index, (cap as u64 - 1) * stride);
        }

        for pair in chain.waypoints().windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
        }
    }

    /// Property: Soundness - e[i] verifies against e[j] at distance j - i
    #[test]
    fn prop_verification_sound(seed in seed_strategy(), i in 0u64..40, gap in 1u64..40) {
        let j = i + gap;
        let ei = element_at(&seed, i).unwrap();
        let ej = element_at(&seed, j).unwrap();
        prop_assert!(verify_element(&ei, i, &ej, gap).is_valid());
    }

    /// Property: Any single bit flip in element or reference is rejected
    #[test]
    fn prop_bit_flip_rejected(
        seed in seed_strategy(),
        i in 0u64..20,
        gap in 1u64..20,
        bit in 0usize..256,
        flip_reference in any::<bool>()
    ) {
        let mut element = element_at(&seed, i).unwrap().to_bytes();
        let mut reference = element_at(&seed, i + gap).unwrap().to_bytes();

        let target = if flip_reference { &mut reference } else { &mut element };
        target[bit / 8] ^= 1 << (bit % 8);

        prop_assert!(!verify_element(&element.into(), i, &reference.into(), gap).is_valid());
    }

    /// Property: Waypoint-assisted verification accepts every genuine element
    #[test]
    fn prop_waypoint_verification(seed in seed_strategy(), n in 1u64..200, cap in 1usize..20, pick in any::<prop::sample::Index>()) {
        let chain = build_chain_with_waypoints(&seed, n, cap).unwrap();
        let index = pick.index(n as usize) as u64;
        let element = element_at(&seed, index).unwrap();
        prop_assert!(chain.verify(&element, index).is_valid());
    }
}
