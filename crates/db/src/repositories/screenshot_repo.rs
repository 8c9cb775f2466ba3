//! Repository for the `screenshots` table.

use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::screenshot::{CreateScreenshot, Screenshot};

/// Column list for screenshots queries.
const SCREENSHOT_COLUMNS: &str = "id, name, s3_id, screenshot_bucket_id, \
    created_at, updated_at";

/// Provides CRUD operations for screenshots.
pub struct ScreenshotRepo;

impl ScreenshotRepo {
    /// Insert a new screenshot into a bucket, returning the created row.
    pub async fn create(
        pool: &PgPool,
        bucket_id: DbId,
        input: &CreateScreenshot,
    ) -> Result<Screenshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO screenshots (name, s3_id, screenshot_bucket_id)
             VALUES ($1, $2, $3)
             RETURNING {SCREENSHOT_COLUMNS}"
        );
        sqlx::query_as::<_, Screenshot>(&query)
            .bind(&input.name)
            .bind(&input.s3_id)
            .bind(bucket_id)
            .fetch_one(pool)
            .await
    }

    /// Insert all screenshots of a freshly uploaded bucket in one
    /// transaction, returning the created rows in input order.
    pub async fn create_many(
        pool: &PgPool,
        bucket_id: DbId,
        inputs: &[CreateScreenshot],
    ) -> Result<Vec<Screenshot>, sqlx::Error> {
        let query = format!(
            "INSERT INTO screenshots (name, s3_id, screenshot_bucket_id)
             VALUES ($1, $2, $3)
             RETURNING {SCREENSHOT_COLUMNS}"
        );
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let screenshot = sqlx::query_as::<_, Screenshot>(&query)
                .bind(&input.name)
                .bind(&input.s3_id)
                .bind(bucket_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(screenshot);
        }
        tx.commit().await?;
        Ok(created)
    }

    /// Find a screenshot by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Screenshot>, sqlx::Error> {
        let query = format!("SELECT {SCREENSHOT_COLUMNS} FROM screenshots WHERE id = $1");
        sqlx::query_as::<_, Screenshot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all screenshots of a bucket, ordered by name.
    pub async fn list_for_bucket(
        pool: &PgPool,
        bucket_id: DbId,
    ) -> Result<Vec<Screenshot>, sqlx::Error> {
        let query = format!(
            "SELECT {SCREENSHOT_COLUMNS} FROM screenshots
             WHERE screenshot_bucket_id = $1
             ORDER BY name ASC"
        );
        sqlx::query_as::<_, Screenshot>(&query)
            .bind(bucket_id)
            .fetch_all(pool)
            .await
    }
}
