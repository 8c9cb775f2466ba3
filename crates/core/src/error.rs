//! Domain errors.
//!
//! Each variant corresponds to one way a review operation can be refused.
//! The messages for `Unauthorized` and `Forbidden` are part of the API
//! contract ("Invalid user identification" / "Invalid user authorization")
//! and are surfaced to clients verbatim, so callers construct them rather
//! than this module.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced row (repository, bucket, build) does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain check: diff validation, score range, or an
    /// unknown status string at the storage boundary.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request carries no usable user identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The identified user holds no right on the target repository.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
