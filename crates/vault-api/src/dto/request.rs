//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use vault_entity::user::UpdateProfile;
use vault_entity::warranty::{PeriodUnit, WarrantyCategory, WarrantyChanges};
use vault_service::{CreateWarranty, Registration};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 150, message = "Name must be 1 to 150 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(alias = "password_confirm")]
    pub password2: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            password: req.password,
            password_confirm: req.password2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(required(message = "Refresh token is required"))]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 150, message = "Name must be 1 to 150 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar: Option<Option<String>>,
}

impl From<UpdateProfileRequest> for UpdateProfile {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            avatar: req.avatar,
        }
    }
}

fn default_period() -> i32 {
    12
}

/// Body for create and full replace.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WarrantyRequest {
    #[validate(length(min = 1, max = 200, message = "Product name must be 1 to 200 characters"))]
    pub product_name: String,
    #[validate(length(min = 1, max = 100, message = "Brand must be 1 to 100 characters"))]
    pub brand: String,
    #[serde(default)]
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    #[serde(default = "default_period")]
    #[validate(range(min = 1, message = "Warranty period must be at least 1"))]
    pub warranty_period: i32,
    #[serde(default)]
    pub warranty_period_unit: PeriodUnit,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl From<WarrantyRequest> for CreateWarranty {
    fn from(req: WarrantyRequest) -> Self {
        Self {
            product_name: req.product_name,
            brand: req.brand,
            category: req.category,
            purchase_date: req.purchase_date,
            warranty_period: req.warranty_period,
            warranty_period_unit: req.warranty_period_unit,
            expiry_date: req.expiry_date,
            notes: req.notes,
        }
    }
}

impl WarrantyRequest {
    /// A full replace. An omitted expiry date leaves the stored one to the
    /// reconciliation rules.
    pub fn into_changes(self) -> WarrantyChanges {
        WarrantyChanges {
            product_name: Some(self.product_name),
            brand: Some(self.brand),
            category: Some(self.category),
            purchase_date: Some(self.purchase_date),
            warranty_period: Some(self.warranty_period),
            warranty_period_unit: Some(self.warranty_period_unit),
            expiry_date: self.expiry_date.map(Some),
            notes: Some(self.notes),
        }
    }
}

/// Body for partial update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct WarrantyPatchRequest {
    #[validate(length(min = 1, max = 200, message = "Product name must be 1 to 200 characters"))]
    pub product_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Brand must be 1 to 100 characters"))]
    pub brand: Option<String>,
    pub category: Option<WarrantyCategory>,
    pub purchase_date: Option<NaiveDate>,
    #[validate(range(min = 1, message = "Warranty period must be at least 1"))]
    pub warranty_period: Option<i32>,
    pub warranty_period_unit: Option<PeriodUnit>,
    #[serde(default, deserialize_with = "double_option")]
    pub expiry_date: Option<Option<NaiveDate>>,
    pub notes: Option<String>,
}

impl From<WarrantyPatchRequest> for WarrantyChanges {
    fn from(req: WarrantyPatchRequest) -> Self {
        Self {
            product_name: req.product_name,
            brand: req.brand,
            category: req.category,
            purchase_date: req.purchase_date,
            warranty_period: req.warranty_period,
            warranty_period_unit: req.warranty_period_unit,
            expiry_date: req.expiry_date,
            notes: req.notes,
        }
    }
}
