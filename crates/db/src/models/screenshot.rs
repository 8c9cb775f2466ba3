//! Screenshot entity model and DTOs. Screenshots are immutable after
//! creation; there is no update DTO.

use retina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `screenshots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Screenshot {
    pub id: DbId,
    pub name: String,
    /// Storage reference of the captured image.
    pub s3_id: String,
    pub screenshot_bucket_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new screenshot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreenshot {
    pub name: String,
    pub s3_id: String,
}
