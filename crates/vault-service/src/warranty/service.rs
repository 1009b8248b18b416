//! Owner-scoped warranty records.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::info;

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::Clock;
use vault_core::types::pagination::{PageRequest, PageResponse};
use vault_core::types::{ShareToken, WarrantyId};
use vault_database::store::WarrantyStore;
use vault_entity::warranty::{
    EXPIRING_SOON_WINDOW_DAYS, NewWarranty, PeriodUnit, Warranty, WarrantyCategory, WarrantyChanges,
    checked_expiry,
};

use super::expiry::reconcile_expiry;
use super::storage::ReceiptStorage;
use crate::context::RequestContext;
use crate::receipt::receipt_extension;

const PRODUCT_NAME_MAX: usize = 200;
const BRAND_MAX: usize = 100;

/// Fields for a new warranty. A missing expiry date is calculated.
#[derive(Debug, Clone)]
pub struct CreateWarranty {
    pub product_name: String,
    pub brand: String,
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    pub warranty_period: i32,
    pub warranty_period_unit: PeriodUnit,
    pub expiry_date: Option<NaiveDate>,
    pub notes: String,
}

/// Dashboard counters for one owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarrantyStats {
    pub total_warranties: u64,
    pub active_warranties: u64,
    pub expiring_soon: u64,
    pub expired_warranties: u64,
}

#[derive(Clone)]
pub struct WarrantyService {
    store: Arc<dyn WarrantyStore>,
    receipts: ReceiptStorage,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for WarrantyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarrantyService")
            .field("receipts", &self.receipts)
            .finish_non_exhaustive()
    }
}

impl WarrantyService {
    pub fn new(store: Arc<dyn WarrantyStore>, receipts: ReceiptStorage, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            receipts,
            clock,
        }
    }

    /// Reference date for status and day counts.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn receipts(&self) -> &ReceiptStorage {
        &self.receipts
    }

    pub async fn create(&self, ctx: &RequestContext, input: CreateWarranty) -> AppResult<Warranty> {
        let product_name = input.product_name.trim().to_string();
        let brand = input.brand.trim().to_string();
        validate_fields(&product_name, &brand, input.warranty_period)?;

        let expiry_date = match input.expiry_date {
            Some(date) => date,
            None => {
                let period = input.warranty_period.unsigned_abs();
                checked_expiry(input.purchase_date, period, input.warranty_period_unit)
                    .ok_or_else(out_of_range)?
            }
        };

        let warranty = self
            .store
            .create(NewWarranty {
                user_id: ctx.user_id,
                product_name,
                brand,
                category: input.category,
                purchase_date: input.purchase_date,
                warranty_period: input.warranty_period,
                warranty_period_unit: input.warranty_period_unit,
                expiry_date: Some(expiry_date),
                share_token: ShareToken::new(),
                notes: input.notes,
            })
            .await?;

        info!(user_id = %ctx.user_id, warranty_id = %warranty.id, %expiry_date, "Warranty created");
        Ok(warranty)
    }

    pub async fn get(&self, ctx: &RequestContext, id: WarrantyId) -> AppResult<Warranty> {
        self.store
            .find_for_user(ctx.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Warranty not found"))
    }

    /// Newest first.
    pub async fn list(&self, ctx: &RequestContext, page: &PageRequest) -> AppResult<PageResponse<Warranty>> {
        self.store.list_for_user(ctx.user_id, page).await
    }

    /// Apply `changes` and reconcile the expiry date against the stored
    /// record.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: WarrantyId,
        changes: WarrantyChanges,
    ) -> AppResult<Warranty> {
        let current = self.get(ctx, id).await?;
        let mut next = changes.merge_into(&current);
        next.product_name = next.product_name.trim().to_string();
        next.brand = next.brand.trim().to_string();
        validate_fields(&next.product_name, &next.brand, next.warranty_period)?;

        next.expiry_date = Some(reconcile_expiry(&current, &next).ok_or_else(out_of_range)?);
        let updated = self.store.update(&next).await?;

        info!(
            user_id = %ctx.user_id,
            warranty_id = %id,
            expiry_date = ?updated.expiry_date,
            "Warranty updated"
        );
        Ok(updated)
    }

    /// Removes the record, its notifications and its receipt file.
    pub async fn delete(&self, ctx: &RequestContext, id: WarrantyId) -> AppResult<()> {
        let current = self.get(ctx, id).await?;
        if !self.store.delete(ctx.user_id, id).await? {
            return Err(AppError::not_found("Warranty not found"));
        }
        if let Some(receipt) = current.receipt_file.as_deref() {
            self.receipts.remove(receipt).await;
        }
        info!(user_id = %ctx.user_id, warranty_id = %id, "Warranty deleted");
        Ok(())
    }

    pub async fn stats(&self, ctx: &RequestContext) -> AppResult<WarrantyStats> {
        let today = self.today();
        let window_end = today
            .checked_add_days(Days::new(EXPIRING_SOON_WINDOW_DAYS.unsigned_abs()))
            .unwrap_or(NaiveDate::MAX);
        let counts = self.store.counts_for_user(ctx.user_id, today, window_end).await?;
        Ok(WarrantyStats {
            total_warranties: counts.total,
            active_warranties: counts.total.saturating_sub(counts.expired + counts.expiring_soon),
            expiring_soon: counts.expiring_soon,
            expired_warranties: counts.expired,
        })
    }

    /// Public lookup by share token. Unknown and malformed tokens are both
    /// reported as not found.
    pub async fn shared(&self, token: &str) -> AppResult<Warranty> {
        let token: ShareToken = token
            .parse()
            .map_err(|_| AppError::not_found("Warranty not found"))?;
        self.store
            .find_by_share_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Warranty not found"))
    }

    /// Store a receipt document for an owned warranty, replacing any
    /// previous one.
    pub async fn attach_receipt(
        &self,
        ctx: &RequestContext,
        id: WarrantyId,
        filename: &str,
        bytes: &[u8],
    ) -> AppResult<Warranty> {
        let extension = receipt_extension(filename)?;
        let mut warranty = self.get(ctx, id).await?;
        let path = self.receipts.save(&extension, bytes, self.today()).await?;

        let previous = warranty.receipt_file.replace(path);
        let updated = match self.store.update(&warranty).await {
            Ok(w) => w,
            Err(e) => {
                if let Some(path) = warranty.receipt_file.as_deref() {
                    self.receipts.remove(path).await;
                }
                return Err(e);
            }
        };
        if let Some(old) = previous.as_deref() {
            self.receipts.remove(old).await;
        }
        info!(user_id = %ctx.user_id, warranty_id = %id, "Receipt attached");
        Ok(updated)
    }
}

fn validate_fields(product_name: &str, brand: &str, warranty_period: i32) -> AppResult<()> {
    if product_name.is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    if product_name.chars().count() > PRODUCT_NAME_MAX {
        return Err(AppError::validation(format!(
            "Product name must be at most {PRODUCT_NAME_MAX} characters"
        )));
    }
    if brand.is_empty() {
        return Err(AppError::validation("Brand is required"));
    }
    if brand.chars().count() > BRAND_MAX {
        return Err(AppError::validation(format!("Brand must be at most {BRAND_MAX} characters")));
    }
    if warranty_period < 1 {
        return Err(AppError::validation("Warranty period must be at least 1"));
    }
    Ok(())
}

fn out_of_range() -> AppError {
    AppError::validation("Warranty period puts the expiry date out of range")
}
