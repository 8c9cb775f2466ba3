//! Repository for the `screenshot_buckets` table.

use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::screenshot_bucket::{CreateScreenshotBucket, ScreenshotBucket};

/// Column list for screenshot_buckets queries.
const BUCKET_COLUMNS: &str = "id, name, commit_sha, branch, repository_id, \
    created_at, updated_at";

/// Provides CRUD operations for screenshot buckets.
pub struct ScreenshotBucketRepo;

impl ScreenshotBucketRepo {
    /// Insert a new screenshot bucket, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateScreenshotBucket,
    ) -> Result<ScreenshotBucket, sqlx::Error> {
        let query = format!(
            "INSERT INTO screenshot_buckets (name, commit_sha, branch, repository_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {BUCKET_COLUMNS}"
        );
        sqlx::query_as::<_, ScreenshotBucket>(&query)
            .bind(&input.name)
            .bind(&input.commit_sha)
            .bind(&input.branch)
            .bind(input.repository_id)
            .fetch_one(pool)
            .await
    }

    /// Find a bucket by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScreenshotBucket>, sqlx::Error> {
        let query = format!("SELECT {BUCKET_COLUMNS} FROM screenshot_buckets WHERE id = $1");
        sqlx::query_as::<_, ScreenshotBucket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently created bucket for a repository branch, used as
    /// the comparison baseline for new builds.
    pub async fn latest_for_branch(
        pool: &PgPool,
        repository_id: DbId,
        branch: &str,
    ) -> Result<Option<ScreenshotBucket>, sqlx::Error> {
        let query = format!(
            "SELECT {BUCKET_COLUMNS} FROM screenshot_buckets
             WHERE repository_id = $1 AND branch = $2
             ORDER BY created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, ScreenshotBucket>(&query)
            .bind(repository_id)
            .bind(branch)
            .fetch_optional(pool)
            .await
    }
}
