//! Retina build-notification infrastructure.
//!
//! - [`EventBus`] -- in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`BuildEvent`] -- the notification envelope published on the bus.
//! - [`push_build_notification`] -- records a `build_notifications` row and
//!   fans the event out to subscribers.

pub mod bus;
pub mod dispatch;

pub use bus::{BuildEvent, EventBus};
pub use dispatch::push_build_notification;
