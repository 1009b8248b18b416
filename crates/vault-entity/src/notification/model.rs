//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vault_core::types::{NotificationId, UserId, WarrantyId};

use super::tier::NotificationTier;

/// An in-app expiry notice raised by the sweep.
///
/// At most one row exists per `(warranty_id, tier)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: NotificationId,
    /// The recipient, always the warranty owner.
    pub user_id: UserId,
    pub warranty_id: WarrantyId,
    pub tier: NotificationTier,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    /// Set once the email copy was accepted by the delivery channel.
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to insert a notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: UserId,
    pub warranty_id: WarrantyId,
    pub tier: NotificationTier,
    pub title: String,
    pub message: String,
}
