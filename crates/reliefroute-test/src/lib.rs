//! Shared test fixtures for ReliefRoute crates.
//!
//! This crate provides data and pure helper functions for testing.
//! It depends only on `reliefroute-core` so that engine tests can use it
//! without pulling in a second copy of the engine.
//!
//! - [`scenario`] - the three-area demo network, inventory and history
//! - [`assert_close`] - float comparison with an absolute tolerance
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! reliefroute-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use reliefroute_test::scenario::{demo_areas, demo_inventory};
//! ```

pub mod scenario;

pub use scenario::{
    demo_areas, demo_centers, demo_features, demo_history, demo_inventory, demo_training_features,
};

/// Default tolerance used by [`assert_close`].
pub const EPSILON: f64 = 1e-9;

/// Asserts `|actual - expected| <= tolerance`.
///
/// # Panics
///
/// Panics with both values when they differ by more than `tolerance`.
#[track_caller]
pub fn assert_close_within(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// Asserts `|actual - expected| <= EPSILON`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert_close_within(actual, expected, EPSILON);
}
