use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::pagination::{PageRequest, PageResponse};
use vault_core::types::{NotificationId, UserId, WarrantyId};
use vault_entity::notification::{NewNotification, Notification, NotificationTier};

use super::{MemoryStore, Row, newest_first};
use crate::store::NotificationStore;

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn exists_for_tier(&self, warranty_id: WarrantyId, tier: NotificationTier) -> AppResult<bool> {
        Ok(self.tables.tiers.contains_key(&(warranty_id, tier)))
    }

    async fn create(&self, data: NewNotification) -> AppResult<Notification> {
        let id = NotificationId::new();
        match self.tables.tiers.entry((data.warranty_id, data.tier)) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(
                    "Notification already exists for this warranty and tier",
                ));
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let notification = Notification {
            id,
            user_id: data.user_id,
            warranty_id: data.warranty_id,
            tier: data.tier,
            title: data.title,
            message: data.message,
            is_read: false,
            email_sent: false,
            created_at: Utc::now(),
        };
        let seq = self.tables.next_seq();
        self.tables.notifications.insert(
            id,
            Row {
                seq,
                value: notification.clone(),
            },
        );
        Ok(notification)
    }

    async fn mark_email_sent(&self, id: NotificationId) -> AppResult<()> {
        if let Some(mut row) = self.tables.notifications.get_mut(&id) {
            row.value.email_sent = true;
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let rows = self
            .tables
            .notifications
            .iter()
            .filter(|row| row.value.user_id == user_id)
            .map(|row| row.value().clone())
            .collect::<Vec<_>>();
        let ordered = newest_first(rows.into_iter(), |n: &Notification| n.created_at);
        Ok(PageResponse::from_all(ordered, page))
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<u64> {
        Ok(self
            .tables
            .notifications
            .iter()
            .filter(|row| row.value.user_id == user_id && row.value.is_unread())
            .count() as u64)
    }

    async fn set_read(
        &self,
        user_id: UserId,
        id: NotificationId,
        is_read: bool,
    ) -> AppResult<Option<Notification>> {
        let Some(mut row) = self.tables.notifications.get_mut(&id) else {
            return Ok(None);
        };
        if row.value.user_id != user_id {
            return Ok(None);
        }
        row.value.is_read = is_read;
        Ok(Some(row.value.clone()))
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let mut changed = 0;
        for mut row in self.tables.notifications.iter_mut() {
            if row.value.user_id == user_id && row.value.is_unread() {
                row.value.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete_read(&self, user_id: UserId) -> AppResult<u64> {
        let doomed: Vec<(NotificationId, WarrantyId, NotificationTier)> = self
            .tables
            .notifications
            .iter()
            .filter(|row| row.value.user_id == user_id && row.value.is_read)
            .map(|row| (row.value.id, row.value.warranty_id, row.value.tier))
            .collect();
        for (id, warranty_id, tier) in &doomed {
            self.tables.notifications.remove(id);
            self.tables.tiers.remove(&(*warranty_id, *tier));
        }
        Ok(doomed.len() as u64)
    }

    async fn delete(&self, user_id: UserId, id: NotificationId) -> AppResult<bool> {
        let removed = self
            .tables
            .notifications
            .remove_if(&id, |_, row| row.value.user_id == user_id);
        if let Some((_, row)) = &removed {
            self.tables.tiers.remove(&(row.value.warranty_id, row.value.tier));
        }
        Ok(removed.is_some())
    }
}
