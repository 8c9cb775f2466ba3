//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod build;
pub mod build_notification;
pub mod organization;
pub mod repository;
pub mod screenshot;
pub mod screenshot_bucket;
pub mod screenshot_diff;
pub mod user;
