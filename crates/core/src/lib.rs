//! Retina domain logic.
//!
//! Pure, I/O-free building blocks shared by the persistence and API crates:
//! status enums with explicit storage-string conversions, build status
//! resolution, and screenshot-diff validation.

pub mod build_status;
pub mod diff;
pub mod error;
pub mod status;
pub mod types;
