//! Screenshot diff entity model and DTOs.

use retina_core::build_status::DiffState;
use retina_core::error::CoreError;
use retina_core::status::ValidationStatus;
use retina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `screenshot_diffs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScreenshotDiff {
    pub id: DbId,
    pub build_id: DbId,
    /// `None` means "new screenshot, no baseline to compare against".
    pub base_screenshot_id: Option<DbId>,
    pub compare_screenshot_id: DbId,
    /// Difference metric in `[0.0, 1.0]`; `None` until the comparison ran.
    pub score: Option<f64>,
    /// Storage reference of the rendered diff image, when one exists.
    pub s3_id: Option<String>,
    pub validation_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ScreenshotDiff {
    /// Parse the stored validation status string into its typed form.
    pub fn validation_status(&self) -> Result<ValidationStatus, CoreError> {
        ValidationStatus::parse(&self.validation_status)
    }

    /// The slice of this row that build status resolution consumes.
    pub fn state(&self) -> Result<DiffState, CoreError> {
        Ok(DiffState {
            score: self.score,
            validation_status: self.validation_status()?,
        })
    }
}

/// DTO for creating a new screenshot diff.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreenshotDiff {
    pub base_screenshot_id: Option<DbId>,
    pub compare_screenshot_id: DbId,
    pub score: Option<f64>,
    pub s3_id: Option<String>,
}
