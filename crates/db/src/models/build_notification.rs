//! Build notification audit model.

use retina_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `build_notifications` table: one dispatched notification.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuildNotification {
    pub id: DbId,
    pub build_id: DbId,
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
