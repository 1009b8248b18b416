use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::UserId;
use vault_entity::user::{CreateUser, UpdateProfile, User};

use super::{MemoryStore, Row};
use crate::store::UserStore;

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let email = data.email.to_lowercase();
        let id = UserId::new();
        match self.tables.emails.entry(email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict("A user with this email already exists"));
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let now = Utc::now();
        let user = User {
            id,
            email,
            name: data.name,
            avatar: None,
            password_hash: data.password_hash,
            is_active: true,
            date_joined: now,
            updated_at: now,
        };
        let seq = self.tables.next_seq();
        self.tables.users.insert(
            id,
            Row {
                seq,
                value: user.clone(),
            },
        );
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|row| row.value.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.tables.emails.get(&email.to_lowercase()).map(|e| *e) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn update_profile(&self, id: UserId, changes: &UpdateProfile) -> AppResult<User> {
        let mut row = self
            .tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if let Some(name) = &changes.name {
            row.value.name = name.clone();
        }
        if let Some(avatar) = &changes.avatar {
            row.value.avatar = avatar.clone();
        }
        row.value.updated_at = Utc::now();
        Ok(row.value.clone())
    }
}
