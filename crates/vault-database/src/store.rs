//! Storage traits for each aggregate.
//!
//! Services depend on these traits rather than on concrete repositories so
//! the same code runs against PostgreSQL and the in-memory stores.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use vault_core::result::AppResult;
use vault_core::types::pagination::{PageRequest, PageResponse};
use vault_core::types::{NotificationId, ShareToken, UserId, WarrantyId};
use vault_entity::notification::{NewNotification, Notification, NotificationTier};
use vault_entity::user::{CreateUser, UpdateProfile, User};
use vault_entity::warranty::{NewWarranty, Warranty};

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Case-insensitive lookup by email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Apply profile changes; `NotFound` if the user is gone.
    async fn update_profile(&self, id: UserId, changes: &UpdateProfile) -> AppResult<User>;
}

/// Aggregate counts behind the stats endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarrantyCounts {
    pub total: u64,
    /// Expiry before the reference day.
    pub expired: u64,
    /// Expiry between the reference day and the window end, inclusive.
    pub expiring_soon: u64,
}

/// Persistence for warranty records.
#[async_trait]
pub trait WarrantyStore: Send + Sync + 'static {
    async fn create(&self, data: NewWarranty) -> AppResult<Warranty>;

    async fn find_by_id(&self, id: WarrantyId) -> AppResult<Option<Warranty>>;

    /// Owner-scoped lookup. Someone else's record is reported as `None`.
    async fn find_for_user(&self, user_id: UserId, id: WarrantyId) -> AppResult<Option<Warranty>>;

    async fn find_by_share_token(&self, token: ShareToken) -> AppResult<Option<Warranty>>;

    /// Owner's warranties, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Warranty>>;

    /// Persist the mutable fields of an existing record (owner, id and share
    /// token are never rewritten) and bump `updated_at`.
    async fn update(&self, warranty: &Warranty) -> AppResult<Warranty>;

    /// Delete an owned record and its notifications. Returns `false` when
    /// nothing matched.
    async fn delete(&self, user_id: UserId, id: WarrantyId) -> AppResult<bool>;

    /// Counts for one owner relative to `today` and `window_end`.
    async fn counts_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
        window_end: NaiveDate,
    ) -> AppResult<WarrantyCounts>;

    /// Every warranty, across owners, whose expiry is on or after `today`.
    async fn find_expiring_on_or_after(&self, today: NaiveDate) -> AppResult<Vec<Warranty>>;
}

/// Persistence for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    async fn exists_for_tier(&self, warranty_id: WarrantyId, tier: NotificationTier) -> AppResult<bool>;

    /// Insert a notification. Fails with `Conflict` when one already exists
    /// for the same warranty and tier.
    async fn create(&self, data: NewNotification) -> AppResult<Notification>;

    async fn mark_email_sent(&self, id: NotificationId) -> AppResult<()>;

    /// Owner's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    async fn count_unread(&self, user_id: UserId) -> AppResult<u64>;

    /// Set the read flag on one owned notification. `None` when the id is
    /// unknown or belongs to someone else.
    async fn set_read(
        &self,
        user_id: UserId,
        id: NotificationId,
        is_read: bool,
    ) -> AppResult<Option<Notification>>;

    /// Mark every unread notification read; returns how many changed.
    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64>;

    /// Delete read notifications only; returns how many were removed.
    async fn delete_read(&self, user_id: UserId) -> AppResult<u64>;

    async fn delete(&self, user_id: UserId, id: NotificationId) -> AppResult<bool>;
}
