//! Repository for the `organizations` and `user_organization_rights` tables.

use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization::{CreateOrganization, Organization};

/// Column list for organizations queries.
const ORGANIZATION_COLUMNS: &str = "id, login, name, created_at, updated_at";

/// Provides CRUD operations for organizations and organization membership.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new organization, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrganization,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (login, name)
             VALUES ($1, $2)
             RETURNING {ORGANIZATION_COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(&input.login)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find an organization by its login.
    pub async fn find_by_login(
        pool: &PgPool,
        login: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {ORGANIZATION_COLUMNS} FROM organizations WHERE login = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(login)
            .fetch_optional(pool)
            .await
    }

    /// Grant a user a right on an organization. Idempotent.
    pub async fn add_member(
        pool: &PgPool,
        organization_id: DbId,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO user_organization_rights (user_id, organization_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_user_organization_rights DO NOTHING",
        )
        .bind(user_id)
        .bind(organization_id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
