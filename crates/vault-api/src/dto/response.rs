//! Response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vault_auth::jwt::TokenPair;
use vault_entity::notification::{Notification, NotificationTier};
use vault_entity::user::User;
use vault_entity::warranty::{PeriodUnit, Warranty, WarrantyCategory, WarrantyStatus};
use vault_service::{ReceiptScan, SweepReport};

use crate::state::AppState;

/// Characters of OCR text echoed back to the client.
const EXTRACTED_PREVIEW_CHARS: usize = 200;

/// User summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_uuid(),
            email: user.email,
            name: user.name,
            avatar: user.avatar,
            date_joined: user.date_joined,
        }
    }
}

/// Register and login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access: String,
    pub refresh: String,
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access,
            refresh: pair.refresh,
        }
    }
}

/// Row in the warranty list.
#[derive(Debug, Clone, Serialize)]
pub struct WarrantyListItem {
    pub id: Uuid,
    pub product_name: String,
    pub brand: String,
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    pub warranty_period: i32,
    pub warranty_period_unit: PeriodUnit,
    pub expiry_date: Option<NaiveDate>,
    pub status: WarrantyStatus,
    pub days_remaining: i64,
    pub share_token: Uuid,
}

impl WarrantyListItem {
    pub fn new(w: Warranty, today: NaiveDate) -> Self {
        Self {
            status: w.status_on(today),
            days_remaining: w.days_remaining_on(today),
            id: w.id.into_uuid(),
            product_name: w.product_name,
            brand: w.brand,
            category: w.category,
            purchase_date: w.purchase_date,
            warranty_period: w.warranty_period,
            warranty_period_unit: w.warranty_period_unit,
            expiry_date: w.expiry_date,
            share_token: w.share_token.into_uuid(),
        }
    }
}

/// Full warranty record for its owner.
#[derive(Debug, Clone, Serialize)]
pub struct WarrantyDetail {
    pub id: Uuid,
    pub product_name: String,
    pub brand: String,
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    pub warranty_period: i32,
    pub warranty_period_unit: PeriodUnit,
    pub expiry_date: Option<NaiveDate>,
    pub status: WarrantyStatus,
    pub days_remaining: i64,
    pub receipt_file: Option<String>,
    pub receipt_file_url: Option<String>,
    pub share_token: Uuid,
    pub notes: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WarrantyDetail {
    pub fn new(state: &AppState, w: Warranty, user_email: &str) -> Self {
        let today = state.clock.today();
        Self {
            status: w.status_on(today),
            days_remaining: w.days_remaining_on(today),
            receipt_file_url: w.receipt_file.as_deref().map(|p| state.media_url(p)),
            id: w.id.into_uuid(),
            product_name: w.product_name,
            brand: w.brand,
            category: w.category,
            purchase_date: w.purchase_date,
            warranty_period: w.warranty_period,
            warranty_period_unit: w.warranty_period_unit,
            expiry_date: w.expiry_date,
            receipt_file: w.receipt_file,
            share_token: w.share_token.into_uuid(),
            notes: w.notes,
            user_email: user_email.to_string(),
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// Read-only view behind a share token. Carries no identifiers.
#[derive(Debug, Clone, Serialize)]
pub struct PublicWarranty {
    pub product_name: String,
    pub brand: String,
    pub category: WarrantyCategory,
    pub purchase_date: NaiveDate,
    pub warranty_period: i32,
    pub warranty_period_unit: PeriodUnit,
    pub expiry_date: Option<NaiveDate>,
    pub status: WarrantyStatus,
    pub days_remaining: i64,
    pub receipt_file_url: Option<String>,
}

impl PublicWarranty {
    pub fn new(state: &AppState, w: Warranty) -> Self {
        let today = state.clock.today();
        Self {
            status: w.status_on(today),
            days_remaining: w.days_remaining_on(today),
            receipt_file_url: w.receipt_file.as_deref().map(|p| state.media_url(p)),
            product_name: w.product_name,
            brand: w.brand,
            category: w.category,
            purchase_date: w.purchase_date,
            warranty_period: w.warranty_period,
            warranty_period_unit: w.warranty_period_unit,
            expiry_date: w.expiry_date,
        }
    }
}

/// Notification with the product it refers to.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub warranty_id: Uuid,
    pub warranty_product_name: String,
    pub warranty_brand: String,
    pub notification_type: NotificationTier,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
    pub time_ago: String,
}

impl NotificationResponse {
    pub fn new(n: Notification, warranty: Option<&Warranty>, now: DateTime<Utc>) -> Self {
        Self {
            id: n.id.into_uuid(),
            warranty_id: n.warranty_id.into_uuid(),
            warranty_product_name: warranty.map(|w| w.product_name.clone()).unwrap_or_default(),
            warranty_brand: warranty.map(|w| w.brand.clone()).unwrap_or_default(),
            notification_type: n.tier,
            title: n.title,
            message: n.message,
            is_read: n.is_read,
            email_sent: n.email_sent,
            time_ago: time_ago(n.created_at, now),
            created_at: n.created_at,
        }
    }
}

/// Coarse relative age such as "3 hours ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let (value, unit) = if elapsed.num_days() >= 1 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() >= 1 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() >= 1 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_string();
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural} ago")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            count: None,
        }
    }

    pub fn with_count(status: &str, count: u64) -> Self {
        Self {
            status: status.to_string(),
            count: Some(count),
        }
    }
}

/// Successful receipt scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReceiptResponse {
    pub success: bool,
    pub message: String,
    pub data: ScannedFields,
    pub confidence: u8,
    pub extracted_text_preview: String,
}

/// Form pre-fill values.
#[derive(Debug, Clone, Serialize)]
pub struct ScannedFields {
    pub product_name: String,
    pub brand: String,
    pub purchase_date: NaiveDate,
    pub warranty_period: u32,
    pub warranty_period_unit: PeriodUnit,
    pub category: WarrantyCategory,
}

impl From<ReceiptScan> for ScanReceiptResponse {
    fn from(scan: ReceiptScan) -> Self {
        let extracted_text_preview = scan.extracted_text.chars().take(EXTRACTED_PREVIEW_CHARS).collect();
        Self {
            success: true,
            message: "Receipt scanned. Review the suggested fields before saving.".to_string(),
            data: ScannedFields {
                product_name: scan.product_name,
                brand: scan.brand,
                purchase_date: scan.purchase_date,
                warranty_period: scan.warranty_period,
                warranty_period_unit: PeriodUnit::Months,
                category: scan.category,
            },
            confidence: scan.confidence,
            extracted_text_preview,
        }
    }
}

/// Failed receipt scan. Always sent with 400.
#[derive(Debug, Clone, Serialize)]
pub struct ScanFailureResponse {
    pub success: bool,
    pub error: String,
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl ScanFailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            data: serde_json::Map::new(),
        }
    }
}

/// Outcome of a triggered sweep.
#[derive(Debug, Clone, Serialize)]
pub struct CronResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_created: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails_sent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures: Option<u64>,
}

impl CronResponse {
    pub fn success(report: SweepReport) -> Self {
        Self {
            status: "success".to_string(),
            message: format!(
                "Expiry check complete: {} warranties scanned",
                report.warranties_scanned
            ),
            notifications_created: Some(report.notifications_created),
            emails_sent: Some(report.emails_sent),
            failures: Some(report.failures),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            notifications_created: None,
            emails_sent: None,
            failures: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
