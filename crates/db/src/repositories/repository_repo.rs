//! Repository for the `repositories` and `user_repository_rights` tables,
//! including the read-permission checks that gate every build read.

use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::repository::{CreateRepository, OwnerRef, Repository};

/// Column list for repositories queries.
const REPOSITORY_COLUMNS: &str = "id, name, private, baseline_branch, user_id, \
    organization_id, created_at, updated_at";

/// A repository is readable when it is public, or the user holds a direct
/// right on it, or a right on its owning organization. `$2` is the user id
/// and may be NULL for unauthenticated requests, in which case only the
/// `private = FALSE` arm can match.
const READABLE_PREDICATE: &str = "(r.private = FALSE
    OR EXISTS (
        SELECT 1 FROM user_repository_rights urr
        WHERE urr.repository_id = r.id AND urr.user_id = $2
    )
    OR (r.organization_id IS NOT NULL AND EXISTS (
        SELECT 1 FROM user_organization_rights uor
        WHERE uor.organization_id = r.organization_id AND uor.user_id = $2
    )))";

/// Provides CRUD operations and permission checks for repositories.
pub struct RepositoryRepo;

impl RepositoryRepo {
    /// Insert a new repository owned by the given user or organization.
    pub async fn create(
        pool: &PgPool,
        owner: OwnerRef,
        input: &CreateRepository,
    ) -> Result<Repository, sqlx::Error> {
        let (user_id, organization_id) = match owner {
            OwnerRef::User(id) => (Some(id), None),
            OwnerRef::Organization(id) => (None, Some(id)),
        };
        let query = format!(
            "INSERT INTO repositories (name, private, baseline_branch, user_id, organization_id)
             VALUES ($1, $2, COALESCE($3, 'master'), $4, $5)
             RETURNING {REPOSITORY_COLUMNS}"
        );
        sqlx::query_as::<_, Repository>(&query)
            .bind(&input.name)
            .bind(input.private)
            .bind(&input.baseline_branch)
            .bind(user_id)
            .bind(organization_id)
            .fetch_one(pool)
            .await
    }

    /// Find a repository by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Repository>, sqlx::Error> {
        let query = format!("SELECT {REPOSITORY_COLUMNS} FROM repositories WHERE id = $1");
        sqlx::query_as::<_, Repository>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the given user (or an anonymous requester) may read the
    /// repository.
    pub async fn check_read_permission(
        pool: &PgPool,
        repository_id: DbId,
        user_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS (
                SELECT 1 FROM repositories r
                WHERE r.id = $1 AND {READABLE_PREDICATE}
            )"
        );
        let (readable,): (bool,) = sqlx::query_as(&query)
            .bind(repository_id)
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(readable)
    }

    /// All repositories of one owner that the given user may read, ordered
    /// by name. Unauthenticated requesters see only the public ones.
    pub async fn list_readable_by_owner(
        pool: &PgPool,
        owner: OwnerRef,
        user_id: Option<DbId>,
    ) -> Result<Vec<Repository>, sqlx::Error> {
        let owner_clause = match owner {
            OwnerRef::User(_) => "r.user_id = $1",
            OwnerRef::Organization(_) => "r.organization_id = $1",
        };
        let owner_id = match owner {
            OwnerRef::User(id) | OwnerRef::Organization(id) => id,
        };
        let query = format!(
            "SELECT {REPOSITORY_COLUMNS} FROM repositories r
             WHERE {owner_clause} AND {READABLE_PREDICATE}
             ORDER BY r.name ASC"
        );
        sqlx::query_as::<_, Repository>(&query)
            .bind(owner_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Whether the user may write to the repository (create builds, ingest
    /// diffs). Public visibility grants reads only, never writes.
    pub async fn check_write_permission(
        pool: &PgPool,
        repository_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (allowed,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                SELECT 1 FROM repositories r
                WHERE r.id = $1
                  AND (EXISTS (
                        SELECT 1 FROM user_repository_rights urr
                        WHERE urr.repository_id = r.id AND urr.user_id = $2
                    )
                    OR (r.organization_id IS NOT NULL AND EXISTS (
                        SELECT 1 FROM user_organization_rights uor
                        WHERE uor.organization_id = r.organization_id AND uor.user_id = $2
                    )))
            )",
        )
        .bind(repository_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(allowed)
    }

    /// Grant a user a direct right on a repository. Idempotent.
    pub async fn grant_right(
        pool: &PgPool,
        repository_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_repository_rights (user_id, repository_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_repository_rights DO NOTHING",
        )
        .bind(user_id)
        .bind(repository_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
