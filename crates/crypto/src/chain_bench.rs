//! Performance sanity checks for chain operations.
//!
//! These tests verify that long chains stay linear:
//! - Build chains of 100,000 elements
//! - Sample waypoints without a measurable slowdown
//! - Verify against close waypoints much faster than against the tail

use crate::chain::{build_chain, build_chain_with_waypoints, element_at};
use crate::verify::verify_against_tail;
use std::time::Instant;

const CHAIN_LENGTH: u64 = 100_000;

#[test]
fn bench_chain_build_100k_elements() {
    println!("\n=== Building Chain with {} Elements ===", CHAIN_LENGTH);

    let start = Instant::now();
    let tail = build_chain(b"bench-seed", CHAIN_LENGTH).unwrap();
    let build_duration = start.elapsed();

    println!("Tail: {}", tail.short_hex());
    println!("Build time: {:.2}ms", build_duration.as_secs_f64() * 1000.0);
    println!(
        "Avg per element: {:.3}μs",
        build_duration.as_micros() as f64 / CHAIN_LENGTH as f64
    );

    // Target: < 100ms in release mode; debug builds on CI are much slower
    let max_build_ms = if cfg!(debug_assertions) { 5_000 } else { 500 };
    assert!(
        build_duration.as_millis() < max_build_ms,
        "Chain build too slow: {}ms (target: <{}ms)",
        build_duration.as_millis(),
        max_build_ms
    );
}

#[test]
fn bench_waypoint_build_100k_elements() {
    println!("\n=== Building Chain with Waypoints ===");

    let start = Instant::now();
    let chain = build_chain_with_waypoints(b"bench-seed", CHAIN_LENGTH, 1024).unwrap();
    let build_duration = start.elapsed();

    println!("Waypoints: {} (stride {})", chain.waypoints_used(), chain.stride());
    println!("Build time: {:.2}ms", build_duration.as_secs_f64() * 1000.0);

    let max_build_ms = if cfg!(debug_assertions) { 5_000 } else { 500 };
    assert!(build_duration.as_millis() < max_build_ms);
    assert_eq!(chain.waypoints_used(), 1024);
    assert_eq!(chain.stride(), 97);
    assert_eq!(chain.tail(), build_chain(b"bench-seed", CHAIN_LENGTH).unwrap());
}

#[test]
fn bench_verify_waypoint_vs_tail() {
    let chain = build_chain_with_waypoints(b"bench-seed", CHAIN_LENGTH, 1024).unwrap();
    let index = 10;
    let element = element_at(b"bench-seed", index).unwrap();

    println!("\n=== Verifying Element {} ===", index);

    let start = Instant::now();
    assert!(verify_against_tail(&element, index, &chain.tail(), CHAIN_LENGTH).is_valid());
    let tail_duration = start.elapsed();

    let start = Instant::now();
    assert!(chain.verify(&element, index).is_valid());
    let waypoint_duration = start.elapsed();

    println!(
        "Against tail: {:.2}ms ({} hashes)",
        tail_duration.as_secs_f64() * 1000.0,
        CHAIN_LENGTH - 1 - index
    );
    println!(
        "Against waypoint: {:.2}μs (at most {} hashes)",
        waypoint_duration.as_secs_f64() * 1_000_000.0,
        chain.stride()
    );

    assert!(
        waypoint_duration <= tail_duration,
        "waypoint verification slower than tail verification"
    );
}
