//! Repository for the `screenshot_diffs` table.

use retina_core::status::ValidationStatus;
use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::screenshot_diff::{CreateScreenshotDiff, ScreenshotDiff};

/// Column list for screenshot_diffs queries.
const DIFF_COLUMNS: &str = "id, build_id, base_screenshot_id, compare_screenshot_id, \
    score, s3_id, validation_status, created_at, updated_at";

/// Provides CRUD operations for screenshot diffs.
pub struct ScreenshotDiffRepo;

impl ScreenshotDiffRepo {
    /// Insert a new diff for a build, returning the created row.
    ///
    /// Callers validate the input first via
    /// `retina_core::diff::validate_screenshot_diff`; the check constraint
    /// on the table is the last line of defense.
    pub async fn create(
        pool: &PgPool,
        build_id: DbId,
        input: &CreateScreenshotDiff,
    ) -> Result<ScreenshotDiff, sqlx::Error> {
        let query = format!(
            "INSERT INTO screenshot_diffs
                (build_id, base_screenshot_id, compare_screenshot_id, score, s3_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DIFF_COLUMNS}"
        );
        sqlx::query_as::<_, ScreenshotDiff>(&query)
            .bind(build_id)
            .bind(input.base_screenshot_id)
            .bind(input.compare_screenshot_id)
            .bind(input.score)
            .bind(&input.s3_id)
            .fetch_one(pool)
            .await
    }

    /// Insert all diffs produced by one comparison run in one transaction,
    /// returning the created rows in input order.
    pub async fn create_many(
        pool: &PgPool,
        build_id: DbId,
        inputs: &[CreateScreenshotDiff],
    ) -> Result<Vec<ScreenshotDiff>, sqlx::Error> {
        let query = format!(
            "INSERT INTO screenshot_diffs
                (build_id, base_screenshot_id, compare_screenshot_id, score, s3_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {DIFF_COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let diff = sqlx::query_as::<_, ScreenshotDiff>(&query)
                .bind(build_id)
                .bind(input.base_screenshot_id)
                .bind(input.compare_screenshot_id)
                .bind(input.score)
                .bind(&input.s3_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(diff);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// List all diffs of a build in reviewer triage order: largest visual
    /// difference first, compare-screenshot name as the stable tie-break.
    pub async fn list_for_build(
        pool: &PgPool,
        build_id: DbId,
    ) -> Result<Vec<ScreenshotDiff>, sqlx::Error> {
        let query = format!(
            "SELECT sd.id, sd.build_id, sd.base_screenshot_id, sd.compare_screenshot_id, \
                    sd.score, sd.s3_id, sd.validation_status, sd.created_at, sd.updated_at
             FROM screenshot_diffs sd
             LEFT JOIN screenshots s ON s.id = sd.compare_screenshot_id
             WHERE sd.build_id = $1
             ORDER BY sd.score DESC NULLS LAST, s.name ASC"
        );
        sqlx::query_as::<_, ScreenshotDiff>(&query)
            .bind(build_id)
            .fetch_all(pool)
            .await
    }

    /// Set the validation status of every diff belonging to a build in a
    /// single bulk update. Returns the number of patched rows.
    pub async fn set_validation_status_for_build(
        pool: &PgPool,
        build_id: DbId,
        status: ValidationStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE screenshot_diffs
             SET validation_status = $2, updated_at = now()
             WHERE build_id = $1",
        )
        .bind(build_id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
