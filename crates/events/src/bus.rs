//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the fan-out hub for [`BuildEvent`]s. It is designed to be
//! shared via `Arc<EventBus>` across the application; delivery consumers
//! (websocket pushers, external queue bridges) subscribe independently.

use chrono::{DateTime, Utc};
use retina_core::status::NotificationKind;
use retina_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A build notification event published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildEvent {
    pub build_id: DbId,
    pub kind: NotificationKind,
    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl BuildEvent {
    pub fn new(build_id: DbId, kind: NotificationKind) -> Self {
        Self {
            build_id,
            kind,
            timestamp: Utc::now(),
        }
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`BuildEvent`].
pub struct EventBus {
    sender: broadcast::Sender<BuildEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// the `build_notifications` table remains the durable record.
    pub fn publish(&self, event: BuildEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BuildEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
