//! Repository for the `build_notifications` table.

use retina_core::status::NotificationKind;
use retina_core::types::DbId;
use sqlx::PgPool;

use crate::models::build_notification::BuildNotification;

/// Column list for build_notifications queries.
const NOTIFICATION_COLUMNS: &str = "id, build_id, kind, created_at, updated_at";

/// Provides CRUD operations for the build notification audit trail.
pub struct BuildNotificationRepo;

impl BuildNotificationRepo {
    /// Record a dispatched notification, returning the created row.
    pub async fn create(
        pool: &PgPool,
        build_id: DbId,
        kind: NotificationKind,
    ) -> Result<BuildNotification, sqlx::Error> {
        let query = format!(
            "INSERT INTO build_notifications (build_id, kind)
             VALUES ($1, $2)
             RETURNING {NOTIFICATION_COLUMNS}"
        );
        sqlx::query_as::<_, BuildNotification>(&query)
            .bind(build_id)
            .bind(kind.as_str())
            .fetch_one(pool)
            .await
    }

    /// List all notifications dispatched for a build, oldest first.
    pub async fn list_for_build(
        pool: &PgPool,
        build_id: DbId,
    ) -> Result<Vec<BuildNotification>, sqlx::Error> {
        let query = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM build_notifications
             WHERE build_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, BuildNotification>(&query)
            .bind(build_id)
            .fetch_all(pool)
            .await
    }
}
