//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::UserId;
use vault_entity::user::{CreateUser, UpdateProfile, User};

use super::insert_error;
use crate::store::UserStore;

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let now = Utc::now();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, password_hash, is_active, date_joined, updated_at) \
             VALUES ($1, LOWER($2), $3, $4, TRUE, $5, $5) RETURNING *",
        )
        .bind(UserId::new())
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error(e, "A user with this email already exists", "Failed to create user"))
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn update_profile(&self, id: UserId, changes: &UpdateProfile) -> AppResult<User> {
        // COALESCE keeps the stored name; the avatar flag distinguishes
        // "leave alone" from "clear".
        let (touch_avatar, avatar) = match &changes.avatar {
            Some(value) => (true, value.clone()),
            None => (false, None),
        };
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
             avatar = CASE WHEN $3 THEN $4 ELSE avatar END, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(touch_avatar)
        .bind(avatar)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update profile", e))?
        .ok_or_else(|| AppError::not_found("User not found"))
    }
}
