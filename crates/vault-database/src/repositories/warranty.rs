//! Warranty repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::types::pagination::{PageRequest, PageResponse};
use vault_core::types::{ShareToken, UserId, WarrantyId};
use vault_entity::warranty::{NewWarranty, Warranty};

use super::insert_error;
use crate::store::{WarrantyCounts, WarrantyStore};

/// PostgreSQL-backed [`WarrantyStore`].
#[derive(Debug, Clone)]
pub struct WarrantyRepository {
    pool: PgPool,
}

impl WarrantyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarrantyStore for WarrantyRepository {
    async fn create(&self, data: NewWarranty) -> AppResult<Warranty> {
        let now = Utc::now();
        sqlx::query_as::<_, Warranty>(
            "INSERT INTO warranties (id, user_id, product_name, brand, category, purchase_date, \
             warranty_period, warranty_period_unit, expiry_date, share_token, notes, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12) RETURNING *",
        )
        .bind(WarrantyId::new())
        .bind(data.user_id)
        .bind(&data.product_name)
        .bind(&data.brand)
        .bind(data.category)
        .bind(data.purchase_date)
        .bind(data.warranty_period)
        .bind(data.warranty_period_unit)
        .bind(data.expiry_date)
        .bind(data.share_token)
        .bind(&data.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| insert_error(e, "Share token collision", "Failed to create warranty"))
    }

    async fn find_by_id(&self, id: WarrantyId) -> AppResult<Option<Warranty>> {
        sqlx::query_as::<_, Warranty>("SELECT * FROM warranties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find warranty", e))
    }

    async fn find_for_user(&self, user_id: UserId, id: WarrantyId) -> AppResult<Option<Warranty>> {
        sqlx::query_as::<_, Warranty>("SELECT * FROM warranties WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find warranty", e))
    }

    async fn find_by_share_token(&self, token: ShareToken) -> AppResult<Option<Warranty>> {
        sqlx::query_as::<_, Warranty>("SELECT * FROM warranties WHERE share_token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find shared warranty", e)
            })
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Warranty>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM warranties WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count warranties", e))?;

        let items = sqlx::query_as::<_, Warranty>(
            "SELECT * FROM warranties WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list warranties", e))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn update(&self, warranty: &Warranty) -> AppResult<Warranty> {
        sqlx::query_as::<_, Warranty>(
            "UPDATE warranties SET product_name = $2, brand = $3, category = $4, purchase_date = $5, \
             warranty_period = $6, warranty_period_unit = $7, expiry_date = $8, receipt_file = $9, \
             notes = $10, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(warranty.id)
        .bind(&warranty.product_name)
        .bind(&warranty.brand)
        .bind(warranty.category)
        .bind(warranty.purchase_date)
        .bind(warranty.warranty_period)
        .bind(warranty.warranty_period_unit)
        .bind(warranty.expiry_date)
        .bind(warranty.receipt_file.as_deref())
        .bind(&warranty.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update warranty", e))?
        .ok_or_else(|| AppError::not_found("Warranty not found"))
    }

    async fn delete(&self, user_id: UserId, id: WarrantyId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM warranties WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete warranty", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn counts_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
        window_end: NaiveDate,
    ) -> AppResult<WarrantyCounts> {
        let (total, expired, expiring_soon): (i64, i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), \
             COUNT(*) FILTER (WHERE expiry_date < $2), \
             COUNT(*) FILTER (WHERE expiry_date >= $2 AND expiry_date <= $3) \
             FROM warranties WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(today)
        .bind(window_end)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count warranties", e))?;

        Ok(WarrantyCounts {
            total: total as u64,
            expired: expired as u64,
            expiring_soon: expiring_soon as u64,
        })
    }

    async fn find_expiring_on_or_after(&self, today: NaiveDate) -> AppResult<Vec<Warranty>> {
        sqlx::query_as::<_, Warranty>(
            "SELECT * FROM warranties WHERE expiry_date >= $1 ORDER BY expiry_date ASC",
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load warranties for sweep", e)
        })
    }
}
