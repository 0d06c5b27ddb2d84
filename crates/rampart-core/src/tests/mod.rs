//! Crate-level test suites.
//!
//! - `integration.rs`: full game scenarios driven through the session.
//! - `determinism.rs`: identical seeds and command scripts produce
//!   identical runs.
//! - `properties.rs`: proptest invariants for the row ordering, occupancy
//!   and movement clipping.
//! - `helpers.rs`: setup utilities shared by the suites.

mod helpers;

pub use helpers::*;
