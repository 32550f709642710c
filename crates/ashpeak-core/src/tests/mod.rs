//! Crate-level tests for the combat core.
//!
//! - `integration.rs`: end-to-end encounters driven through the public API
//! - `properties.rs`: proptest invariants over arbitrary operation sequences
//! - `helpers.rs`: factory functions and drivers shared by both

mod helpers;

pub use helpers::*;
