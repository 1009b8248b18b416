//! Warranty entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vault_core::types::{ShareToken, UserId, WarrantyId};

use super::category::WarrantyCategory;
use super::period::{PeriodUnit, checked_expiry};
use super::status::{WarrantyStatus, days_remaining};

/// A product warranty owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Warranty {
    pub id: WarrantyId,
    pub user_id: UserId,
    pub product_name: String,
    pub brand: String,
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    /// Length of the warranty in `warranty_period_unit`s. Always >= 1.
    pub warranty_period: i32,
    pub warranty_period_unit: PeriodUnit,
    /// Computed from the purchase date and period unless overridden.
    pub expiry_date: Option<NaiveDate>,
    /// Relative path of the uploaded receipt under the data root.
    pub receipt_file: Option<String>,
    /// Public read token, fixed at creation.
    pub share_token: ShareToken,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Warranty {
    /// Expiry date the current inputs produce, ignoring any override.
    pub fn calculated_expiry(&self) -> Option<NaiveDate> {
        let period = u32::try_from(self.warranty_period).ok().filter(|p| *p >= 1)?;
        checked_expiry(self.purchase_date, period, self.warranty_period_unit)
    }

    pub fn status_on(&self, today: NaiveDate) -> WarrantyStatus {
        WarrantyStatus::on(self.expiry_date, today)
    }

    pub fn days_remaining_on(&self, today: NaiveDate) -> i64 {
        days_remaining(self.expiry_date, today)
    }
}

/// Validated data for inserting a warranty. `expiry_date` is already
/// resolved by the caller.
#[derive(Debug, Clone)]
pub struct NewWarranty {
    pub user_id: UserId,
    pub product_name: String,
    pub brand: String,
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    pub warranty_period: i32,
    pub warranty_period_unit: PeriodUnit,
    pub expiry_date: Option<NaiveDate>,
    pub share_token: ShareToken,
    pub notes: String,
}

/// A partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WarrantyChanges {
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<WarrantyCategory>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_period: Option<i32>,
    pub warranty_period_unit: Option<PeriodUnit>,
    /// `Some(None)` clears the stored expiry so it is recomputed.
    pub expiry_date: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

impl WarrantyChanges {
    /// Apply the change set on top of `current`, without reconciling the
    /// expiry date.
    pub fn merge_into(&self, current: &Warranty) -> Warranty {
        let mut next = current.clone();
        if let Some(v) = &self.product_name {
            next.product_name = v.clone();
        }
        if let Some(v) = &self.brand {
            next.brand = v.clone();
        }
        if let Some(v) = self.category {
            next.category = v;
        }
        if let Some(v) = self.purchase_date {
            next.purchase_date = v;
        }
        if let Some(v) = self.warranty_period {
            next.warranty_period = v;
        }
        if let Some(v) = self.warranty_period_unit {
            next.warranty_period_unit = v;
        }
        if let Some(v) = self.expiry_date {
            next.expiry_date = v;
        }
        if let Some(v) = &self.notes {
            next.notes = v.clone();
        }
        next
    }
}
