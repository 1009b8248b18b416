use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::types::pagination::{PageRequest, PageResponse};
use vault_core::types::{ShareToken, UserId, WarrantyId};
use vault_entity::warranty::{NewWarranty, Warranty};

use super::{MemoryStore, Row, newest_first};
use crate::store::{WarrantyCounts, WarrantyStore};

#[async_trait]
impl WarrantyStore for MemoryStore {
    async fn create(&self, data: NewWarranty) -> AppResult<Warranty> {
        let token_taken = self
            .tables
            .warranties
            .iter()
            .any(|row| row.value.share_token == data.share_token);
        if token_taken {
            return Err(AppError::conflict("Share token collision"));
        }

        let now = Utc::now();
        let warranty = Warranty {
            id: WarrantyId::new(),
            user_id: data.user_id,
            product_name: data.product_name,
            brand: data.brand,
            category: data.category,
            purchase_date: data.purchase_date,
            warranty_period: data.warranty_period,
            warranty_period_unit: data.warranty_period_unit,
            expiry_date: data.expiry_date,
            receipt_file: None,
            share_token: data.share_token,
            notes: data.notes,
            created_at: now,
            updated_at: now,
        };
        let seq = self.tables.next_seq();
        self.tables.warranties.insert(
            warranty.id,
            Row {
                seq,
                value: warranty.clone(),
            },
        );
        Ok(warranty)
    }

    async fn find_by_id(&self, id: WarrantyId) -> AppResult<Option<Warranty>> {
        Ok(self.tables.warranties.get(&id).map(|row| row.value.clone()))
    }

    async fn find_for_user(&self, user_id: UserId, id: WarrantyId) -> AppResult<Option<Warranty>> {
        Ok(self
            .tables
            .warranties
            .get(&id)
            .filter(|row| row.value.user_id == user_id)
            .map(|row| row.value.clone()))
    }

    async fn find_by_share_token(&self, token: ShareToken) -> AppResult<Option<Warranty>> {
        Ok(self
            .tables
            .warranties
            .iter()
            .find(|row| row.value.share_token == token)
            .map(|row| row.value.clone()))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Warranty>> {
        let rows = self
            .tables
            .warranties
            .iter()
            .filter(|row| row.value.user_id == user_id)
            .map(|row| row.value().clone())
            .collect::<Vec<_>>();
        let ordered = newest_first(rows.into_iter(), |w: &Warranty| w.created_at);
        Ok(PageResponse::from_all(ordered, page))
    }

    async fn update(&self, warranty: &Warranty) -> AppResult<Warranty> {
        let mut row = self
            .tables
            .warranties
            .get_mut(&warranty.id)
            .ok_or_else(|| AppError::not_found("Warranty not found"))?;
        let stored = &mut row.value;
        stored.product_name = warranty.product_name.clone();
        stored.brand = warranty.brand.clone();
        stored.category = warranty.category;
        stored.purchase_date = warranty.purchase_date;
        stored.warranty_period = warranty.warranty_period;
        stored.warranty_period_unit = warranty.warranty_period_unit;
        stored.expiry_date = warranty.expiry_date;
        stored.receipt_file = warranty.receipt_file.clone();
        stored.notes = warranty.notes.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, user_id: UserId, id: WarrantyId) -> AppResult<bool> {
        let removed = self
            .tables
            .warranties
            .remove_if(&id, |_, row| row.value.user_id == user_id)
            .is_some();
        if removed {
            self.tables.notifications.retain(|_, row| row.value.warranty_id != id);
            self.tables.tiers.retain(|(warranty_id, _), _| *warranty_id != id);
        }
        Ok(removed)
    }

    async fn counts_for_user(
        &self,
        user_id: UserId,
        today: NaiveDate,
        window_end: NaiveDate,
    ) -> AppResult<WarrantyCounts> {
        let mut counts = WarrantyCounts::default();
        for row in self.tables.warranties.iter() {
            let w = &row.value;
            if w.user_id != user_id {
                continue;
            }
            counts.total += 1;
            match w.expiry_date {
                Some(expiry) if expiry < today => counts.expired += 1,
                Some(expiry) if expiry <= window_end => counts.expiring_soon += 1,
                _ => {}
            }
        }
        Ok(counts)
    }

    async fn find_expiring_on_or_after(&self, today: NaiveDate) -> AppResult<Vec<Warranty>> {
        let mut due: Vec<Warranty> = self
            .tables
            .warranties
            .iter()
            .filter(|row| row.value.expiry_date.is_some_and(|e| e >= today))
            .map(|row| row.value.clone())
            .collect();
        due.sort_by_key(|w| w.expiry_date);
        Ok(due)
    }
}
