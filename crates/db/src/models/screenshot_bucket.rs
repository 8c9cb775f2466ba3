//! Screenshot bucket entity model and DTOs.

use retina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `screenshot_buckets` table: a named set of screenshots
/// captured for one commit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScreenshotBucket {
    pub id: DbId,
    pub name: String,
    pub commit_sha: String,
    pub branch: String,
    pub repository_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new screenshot bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreenshotBucket {
    pub name: String,
    pub commit_sha: String,
    pub branch: String,
    pub repository_id: DbId,
}
