//! Utilities shared by Lyra tests.
//!
//! This crate contains canned class hierarchies for resolver tests plus a
//! small tracing bootstrap so `RUST_LOG=lyra.resolve=trace` works while
//! debugging a test.

pub mod fixtures;
pub mod logging;

pub use fixtures::{box_hierarchy, BoxHierarchy};
