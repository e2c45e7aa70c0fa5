//! Configuration types
//!
//! Board-agnostic startup configuration, validated before the tasks start.

pub mod types;

pub use types::*;
