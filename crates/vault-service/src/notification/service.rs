//! Owner-scoped access to notifications.

use std::sync::Arc;

use tracing::info;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::NotificationId;
use vault_core::types::pagination::{PageRequest, PageResponse};
use vault_database::store::NotificationStore;
use vault_entity::notification::Notification;

use crate::context::RequestContext;

/// Lists and updates the caller's notifications.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish_non_exhaustive()
    }
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.store.list_for_user(ctx.user_id, page).await
    }

    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<u64> {
        self.store.count_unread(ctx.user_id).await
    }

    pub async fn mark_read(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<Notification> {
        self.set_read(ctx, id, true).await
    }

    pub async fn mark_unread(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<Notification> {
        self.set_read(ctx, id, false).await
    }

    async fn set_read(&self, ctx: &RequestContext, id: NotificationId, is_read: bool) -> AppResult<Notification> {
        self.store
            .set_read(ctx.user_id, id, is_read)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Returns how many notifications changed.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let count = self.store.mark_all_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, count, "Marked all notifications read");
        Ok(count)
    }

    /// Deletes read notifications only. Unread ones are never touched.
    pub async fn clear_read(&self, ctx: &RequestContext) -> AppResult<u64> {
        let count = self.store.delete_read(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, count, "Cleared read notifications");
        Ok(count)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: NotificationId) -> AppResult<()> {
        if self.store.delete(ctx.user_id, id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }
}
