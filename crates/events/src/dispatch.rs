//! Build notification dispatch.
//!
//! Recording the `build_notifications` row and the broadcast publish are a
//! single call so every dispatched notification leaves an audit trail. The
//! dispatch is deliberately not transactional with whatever mutation
//! triggered it; callers commit their own writes first.

use retina_core::status::NotificationKind;
use retina_core::types::DbId;
use retina_db::models::build_notification::BuildNotification;
use retina_db::repositories::BuildNotificationRepo;
use retina_db::DbPool;

use crate::bus::{BuildEvent, EventBus};

/// Record and publish a build notification.
///
/// Inserts the audit row, then fans the event out on the bus. Returns the
/// stored row.
pub async fn push_build_notification(
    pool: &DbPool,
    bus: &EventBus,
    build_id: DbId,
    kind: NotificationKind,
) -> Result<BuildNotification, sqlx::Error> {
    let notification = BuildNotificationRepo::create(pool, build_id, kind).await?;

    bus.publish(BuildEvent::new(build_id, kind));

    tracing::info!(
        build_id,
        kind = kind.as_str(),
        "Build notification dispatched"
    );

    Ok(notification)
}
