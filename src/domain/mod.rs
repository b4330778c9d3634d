//! Domain types and invariants.

pub mod error;
pub mod types;
