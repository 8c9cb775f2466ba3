//! Repository for the `builds` table.

use retina_core::status::JobStatus;
use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::build::{Build, CreateBuild};
use crate::models::user::User;

/// Column list for builds queries.
const BUILD_COLUMNS: &str = "id, number, base_screenshot_bucket_id, \
    compare_screenshot_bucket_id, repository_id, job_status, created_at, updated_at";

/// Provides CRUD operations for builds.
pub struct BuildRepo;

impl BuildRepo {
    /// Insert a new build, allocating the next per-repository number inside
    /// the INSERT. A concurrent insert racing for the same number hits the
    /// `uq_builds_repository_number` constraint and surfaces as a conflict.
    pub async fn create(pool: &PgPool, input: &CreateBuild) -> Result<Build, sqlx::Error> {
        let query = format!(
            "INSERT INTO builds
                (number, base_screenshot_bucket_id, compare_screenshot_bucket_id, repository_id)
             SELECT COALESCE(MAX(number), 0) + 1, $1, $2, $3
             FROM builds WHERE repository_id = $3
             RETURNING {BUILD_COLUMNS}"
        );
        sqlx::query_as::<_, Build>(&query)
            .bind(input.base_screenshot_bucket_id)
            .bind(input.compare_screenshot_bucket_id)
            .bind(input.repository_id)
            .fetch_one(pool)
            .await
    }

    /// Find a build by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Build>, sqlx::Error> {
        let query = format!("SELECT {BUILD_COLUMNS} FROM builds WHERE id = $1");
        sqlx::query_as::<_, Build>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all builds of a repository, newest number first.
    pub async fn list_for_repository(
        pool: &PgPool,
        repository_id: DbId,
    ) -> Result<Vec<Build>, sqlx::Error> {
        let query = format!(
            "SELECT {BUILD_COLUMNS} FROM builds
             WHERE repository_id = $1
             ORDER BY number DESC"
        );
        sqlx::query_as::<_, Build>(&query)
            .bind(repository_id)
            .fetch_all(pool)
            .await
    }

    /// Find the given user among the users holding a right on the build's
    /// repository, directly or via its owning organization.
    ///
    /// Returns `None` when the user is unrelated to the build, which the
    /// validation mutation treats as an authorization failure.
    pub async fn get_user(
        pool: &PgPool,
        build_id: DbId,
        user_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.login, u.name, u.email, u.created_at, u.updated_at
             FROM users u
             JOIN builds b ON b.id = $1
             JOIN repositories r ON r.id = b.repository_id
             WHERE u.id = $2
               AND (
                 EXISTS (
                     SELECT 1 FROM user_repository_rights urr
                     WHERE urr.repository_id = r.id AND urr.user_id = u.id
                 )
                 OR (r.organization_id IS NOT NULL AND EXISTS (
                     SELECT 1 FROM user_organization_rights uor
                     WHERE uor.organization_id = r.organization_id AND uor.user_id = u.id
                 ))
               )",
        )
        .bind(build_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Update the comparison job status of a build.
    pub async fn update_job_status(
        pool: &PgPool,
        build_id: DbId,
        job_status: JobStatus,
    ) -> Result<Option<Build>, sqlx::Error> {
        let query = format!(
            "UPDATE builds SET job_status = $2, updated_at = now()
             WHERE id = $1
             RETURNING {BUILD_COLUMNS}"
        );
        sqlx::query_as::<_, Build>(&query)
            .bind(build_id)
            .bind(job_status.as_str())
            .fetch_optional(pool)
            .await
    }
}
