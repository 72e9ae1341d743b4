//! Common utility functions shared across the domain.
//!
//! - **Pure functions only** - no side effects, no I/O

pub mod loose;

pub use loose::{finite_number, loose_i32, loose_i64, loose_u32};
