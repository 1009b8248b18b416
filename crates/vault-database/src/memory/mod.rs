//! In-memory implementations of the store traits.
//!
//! Backed by `dashmap` so the stores can be shared across tasks without an
//! outer lock. Used by the test suites and by `vault-cli` dry runs.

mod notification;
mod user;
mod warranty;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use vault_core::types::{NotificationId, UserId, WarrantyId};
use vault_entity::notification::{Notification, NotificationTier};
use vault_entity::user::User;
use vault_entity::warranty::Warranty;

/// A value tagged with its insertion sequence, used to order rows that
/// share a `created_at` timestamp.
#[derive(Debug, Clone)]
struct Row<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct Tables {
    seq: AtomicU64,
    users: DashMap<UserId, Row<User>>,
    /// Lowercased email → owner, claimed atomically on insert.
    emails: DashMap<String, UserId>,
    warranties: DashMap<WarrantyId, Row<Warranty>>,
    notifications: DashMap<NotificationId, Row<Notification>>,
    /// Enforces one notification per warranty and tier.
    tiers: DashMap<(WarrantyId, NotificationTier), NotificationId>,
}

impl Tables {
    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// Shared in-memory database implementing [`UserStore`](crate::UserStore),
/// [`WarrantyStore`](crate::WarrantyStore) and
/// [`NotificationStore`](crate::NotificationStore). Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notifications across all users.
    pub fn notification_count(&self) -> usize {
        self.tables.notifications.len()
    }
}

/// Sort newest first, breaking timestamp ties by insertion order.
fn newest_first<T: Clone>(
    rows: impl Iterator<Item = Row<T>>,
    created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut rows: Vec<Row<T>> = rows.collect();
    rows.sort_by(|a, b| {
        created_at(&b.value)
            .cmp(&created_at(&a.value))
            .then(b.seq.cmp(&a.seq))
    });
    rows.into_iter().map(|r| r.value).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::store::{NotificationStore, UserStore, WarrantyStore};
    use vault_core::types::ShareToken;
    use vault_core::types::pagination::PageRequest;
    use vault_entity::notification::NewNotification;
    use vault_entity::user::CreateUser;
    use vault_entity::warranty::{NewWarranty, PeriodUnit, WarrantyCategory};

    async fn seed(store: &MemoryStore) -> (UserId, Warranty) {
        let user = UserStore::create(
            store,
            CreateUser {
                email: "Owner@Example.com".into(),
                name: "Owner".into(),
                password_hash: "hash".into(),
            },
        )
        .await
        .expect("user");
        let warranty = WarrantyStore::create(
            store,
            NewWarranty {
                user_id: user.id,
                product_name: "Fridge".into(),
                brand: "Coolco".into(),
                category: WarrantyCategory::HomeAppliances,
                purchase_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"),
                warranty_period: 12,
                warranty_period_unit: PeriodUnit::Months,
                expiry_date: NaiveDate::from_ymd_opt(2026, 1, 1),
                share_token: ShareToken::new(),
                notes: String::new(),
            },
        )
        .await
        .expect("warranty");
        (user.id, warranty)
    }

    fn notice(user_id: UserId, warranty_id: WarrantyId, tier: NotificationTier) -> NewNotification {
        NewNotification {
            user_id,
            warranty_id,
            tier,
            title: "t".into(),
            message: "m".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_case_insensitively() {
        let store = MemoryStore::new();
        seed(&store).await;
        let err = UserStore::create(
            &store,
            CreateUser {
                email: "owner@example.COM".into(),
                name: "Other".into(),
                password_hash: "hash".into(),
            },
        )
        .await
        .expect_err("duplicate");
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn second_notification_for_same_tier_conflicts() {
        let store = MemoryStore::new();
        let (user_id, w) = seed(&store).await;
        NotificationStore::create(&store, notice(user_id, w.id, NotificationTier::TenDays))
            .await
            .expect("first");
        let err = NotificationStore::create(&store, notice(user_id, w.id, NotificationTier::TenDays))
            .await
            .expect_err("second");
        assert!(err.is_conflict());
        assert!(store.exists_for_tier(w.id, NotificationTier::TenDays).await.expect("exists"));
        assert!(!store.exists_for_tier(w.id, NotificationTier::OneDay).await.expect("exists"));
    }

    #[tokio::test]
    async fn clearing_read_keeps_unread() {
        let store = MemoryStore::new();
        let (user_id, w) = seed(&store).await;
        let read = NotificationStore::create(&store, notice(user_id, w.id, NotificationTier::ThirtyDays))
            .await
            .expect("create");
        NotificationStore::create(&store, notice(user_id, w.id, NotificationTier::TwentyDays))
            .await
            .expect("create");
        store.set_read(user_id, read.id, true).await.expect("read");

        assert_eq!(store.delete_read(user_id).await.expect("clear"), 1);
        assert_eq!(store.count_unread(user_id).await.expect("count"), 1);
        assert_eq!(store.notification_count(), 1);
    }

    #[tokio::test]
    async fn other_users_cannot_touch_notifications() {
        let store = MemoryStore::new();
        let (user_id, w) = seed(&store).await;
        let n = NotificationStore::create(&store, notice(user_id, w.id, NotificationTier::Expired))
            .await
            .expect("create");
        let stranger = UserId::new();
        assert!(store.set_read(stranger, n.id, true).await.expect("set").is_none());
        assert!(!NotificationStore::delete(&store, stranger, n.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn deleting_warranty_cascades() {
        let store = MemoryStore::new();
        let (user_id, w) = seed(&store).await;
        NotificationStore::create(&store, notice(user_id, w.id, NotificationTier::OneDay))
            .await
            .expect("create");
        assert!(WarrantyStore::delete(&store, user_id, w.id).await.expect("delete"));
        assert_eq!(store.notification_count(), 0);
        let page = NotificationStore::list_for_user(&store, user_id, &PageRequest::default())
            .await
            .expect("list");
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = MemoryStore::new();
        let (user_id, w) = seed(&store).await;
        for tier in [NotificationTier::ThirtyDays, NotificationTier::TwentyDays, NotificationTier::TenDays] {
            NotificationStore::create(&store, notice(user_id, w.id, tier))
                .await
                .expect("create");
        }
        let page = NotificationStore::list_for_user(&store, user_id, &PageRequest::default())
            .await
            .expect("list");
        let tiers: Vec<_> = page.items.iter().map(|n| n.tier).collect();
        assert_eq!(
            tiers,
            vec![NotificationTier::TenDays, NotificationTier::TwentyDays, NotificationTier::ThirtyDays]
        );
    }
}
