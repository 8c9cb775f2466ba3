//! Build entity model and DTOs.

use retina_core::error::CoreError;
use retina_core::status::JobStatus;
use retina_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `builds` table.
///
/// The externally visible status is not a column; it is resolved at read
/// time from `job_status` and the build's screenshot diffs
/// (`retina_core::build_status::resolve_build_status`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Build {
    pub id: DbId,
    /// Continuous per-repository number, incremented for each build.
    pub number: i32,
    /// Absent for the first build of a branch (no baseline yet).
    pub base_screenshot_bucket_id: Option<DbId>,
    pub compare_screenshot_bucket_id: DbId,
    pub repository_id: DbId,
    pub job_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Build {
    /// Parse the stored job status string into its typed form.
    pub fn job_status(&self) -> Result<JobStatus, CoreError> {
        JobStatus::parse(&self.job_status)
    }
}

/// DTO for creating a new build. The per-repository `number` is allocated
/// by the repository layer, not supplied by callers.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBuild {
    pub repository_id: DbId,
    pub base_screenshot_bucket_id: Option<DbId>,
    pub compare_screenshot_bucket_id: DbId,
}
