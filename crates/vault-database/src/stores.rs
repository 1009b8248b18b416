//! One handle bundling the three stores a running service needs.

use std::sync::Arc;

use sqlx::PgPool;

use crate::memory::MemoryStore;
use crate::repositories::{NotificationRepository, UserRepository, WarrantyRepository};
use crate::store::{NotificationStore, UserStore, WarrantyStore};

/// Store trait objects handed to the services.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub warranties: Arc<dyn WarrantyStore>,
    pub notifications: Arc<dyn NotificationStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

impl Stores {
    /// sqlx repositories over a shared pool.
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            warranties: Arc::new(WarrantyRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
        }
    }

    /// All three traits backed by one shared in-memory database.
    pub fn memory(store: &MemoryStore) -> Self {
        let shared = Arc::new(store.clone());
        Self {
            users: shared.clone(),
            warranties: shared.clone(),
            notifications: shared,
        }
    }
}
