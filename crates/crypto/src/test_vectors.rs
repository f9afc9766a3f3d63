//! Known-answer vectors pinning chain output across builds.
//!
//! SHA-256 digests come from FIPS 180-2 and independent recomputation; the
//! HMAC vector is RFC 4231 test case 2.

use crate::chain::{build_chain, build_chain_with_waypoints, element_at, Blake3Chain};
use crate::digest::{hmac_sha256, Blake3Digest, ChainDigest, Sha256Digest};
use crate::verify::verify_element;
use shachain_core::ChainElement;

/// A chain element expected at a fixed position.
struct ChainTestVector {
    name: &'static str,
    seed: &'static [u8],
    index: u64,
    expected_hex: &'static str,
}

const ZERO_SEED: [u8; 32] = [0u8; 32];

fn get_test_vectors() -> Vec<ChainTestVector> {
    vec![
        ChainTestVector {
            name: "vector_1_empty_seed",
            seed: b"",
            index: 0,
            expected_hex: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        ChainTestVector {
            name: "vector_2_abc_head",
            seed: b"abc",
            index: 0,
            expected_hex: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        ChainTestVector {
            name: "vector_3_abc_second",
            seed: b"abc",
            index: 1,
            expected_hex: "4f8b42c22dd3729b519ba6f68d2da7cc5b2d606d05daed5ad5128cc03e6c6358",
        },
        ChainTestVector {
            name: "vector_4_abc_third",
            seed: b"abc",
            index: 2,
            expected_hex: "f2a778f1a6ed3d5bc59a5d79104c598f3f07093f240ca4e91333fb09ed4f36da",
        },
        ChainTestVector {
            name: "vector_5_zero_seed_tail",
            seed: &ZERO_SEED,
            index: 4,
            expected_hex: "376da11fe3ab3d0eaaddb418ccb49b5426d5c2504f526f7766580f6e45984e3b",
        },
        ChainTestVector {
            name: "vector_6_long_chain_waypoint",
            seed: b"shachain",
            index: 900,
            expected_hex: "020cd0ae043628c8f7533191e8c2d6134195282c494450d9551de40361b72641",
        },
        ChainTestVector {
            name: "vector_7_long_chain_tail",
            seed: b"shachain",
            index: 999,
            expected_hex: "c4d74405d7630b0fee7a848025c334dc538e82f3cc9743a90d126d014ceaf17c",
        },
    ]
}

#[test]
fn test_chain_vectors() {
    for vector in get_test_vectors() {
        let element = element_at(vector.seed, vector.index).unwrap();
        assert_eq!(element.to_hex(), vector.expected_hex, "{}", vector.name);

        let tail = build_chain(vector.seed, vector.index + 1).unwrap();
        assert_eq!(tail, element, "{}", vector.name);
    }
}

#[test]
fn test_zero_seed_scenario() {
    let expected = [
        "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925",
        "2b32db6c2c0a6235fb1397e8225ea85e0f0e6e8c7b126d0016ccbde0e667151e",
        "12771355e46cd47c71ed1721fd5319b383cca3a1f9fce3aa1c8cd3bd37af20d7",
        "fe15c0d3ebe314fad720a08b839a004c2e6386f5aecc19ec74807d1920cb6aeb",
        "376da11fe3ab3d0eaaddb418ccb49b5426d5c2504f526f7766580f6e45984e3b",
    ];
    let chain = build_chain_with_waypoints(&ZERO_SEED, 5, 5).unwrap();
    for (waypoint, hex) in chain.waypoints().iter().zip(expected) {
        assert_eq!(waypoint.element, ChainElement::from_hex(hex).unwrap());
    }

    let e2 = chain.waypoints()[2].element;
    let e4 = chain.tail();
    assert!(verify_element(&e2, 2, &e4, 2).is_valid());
    assert!(!verify_element(&e2, 2, &e4, 1).is_valid());
}

#[test]
fn test_long_chain_sparse_waypoints() {
    let chain = build_chain_with_waypoints(b"shachain", 1000, 10).unwrap();
    let last = chain.waypoints().last().unwrap();
    assert_eq!(last.index, 900);
    assert_eq!(
        last.element.to_hex(),
        "020cd0ae043628c8f7533191e8c2d6134195282c494450d9551de40361b72641"
    );
    assert_eq!(
        chain.tail().to_hex(),
        "c4d74405d7630b0fee7a848025c334dc538e82f3cc9743a90d126d014ceaf17c"
    );
}

#[test]
fn test_digest_vectors() {
    assert_eq!(
        Blake3Digest::digest(b"").to_hex(),
        "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
    );
    assert_eq!(Blake3Chain::build(b"", 1).unwrap(), Blake3Digest::digest(b""));
    assert_eq!(
        Sha256Digest::digest(b"").to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_hmac_rfc4231_case_2() {
    let tag = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
    assert_eq!(
        hex::encode(tag),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}
