//! Repository entity model and DTOs.

use retina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `repositories` table.
///
/// Exactly one of `user_id` / `organization_id` is set (enforced by a
/// check constraint).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Repository {
    pub id: DbId,
    pub name: String,
    pub private: bool,
    /// Branch whose latest screenshot bucket serves as the comparison
    /// baseline for new builds.
    pub baseline_branch: String,
    pub user_id: Option<DbId>,
    pub organization_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The owning side of a repository: a user or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRef {
    User(DbId),
    Organization(DbId),
}

/// DTO for creating a new repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRepository {
    pub name: String,
    pub private: bool,
    pub baseline_branch: Option<String>,
}
