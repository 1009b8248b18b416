//! Notification domain entities.

pub mod model;
pub mod tier;

pub use model::{NewNotification, Notification};
pub use tier::NotificationTier;
