//! Days-remaining thresholds that raise a notification.
//!
//! The serialized tags (`"30_days"` … `"expired"`) are a compatibility
//! surface for clients and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vault_core::AppError;

/// One of the seven fixed notification tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_tier")]
pub enum NotificationTier {
    #[serde(rename = "30_days")]
    #[sqlx(rename = "30_days")]
    ThirtyDays,
    #[serde(rename = "20_days")]
    #[sqlx(rename = "20_days")]
    TwentyDays,
    #[serde(rename = "10_days")]
    #[sqlx(rename = "10_days")]
    TenDays,
    #[serde(rename = "3_days")]
    #[sqlx(rename = "3_days")]
    ThreeDays,
    #[serde(rename = "2_days")]
    #[sqlx(rename = "2_days")]
    TwoDays,
    #[serde(rename = "1_day")]
    #[sqlx(rename = "1_day")]
    OneDay,
    #[serde(rename = "expired")]
    #[sqlx(rename = "expired")]
    Expired,
}

impl NotificationTier {
    /// All tiers, furthest from expiry first.
    pub const ALL: [NotificationTier; 7] = [
        Self::ThirtyDays,
        Self::TwentyDays,
        Self::TenDays,
        Self::ThreeDays,
        Self::TwoDays,
        Self::OneDay,
        Self::Expired,
    ];

    /// Map whole days until expiry to a tier. Exact matches only; every
    /// other value (29, 15, negative, ...) raises nothing.
    pub fn for_days_remaining(days: i64) -> Option<Self> {
        match days {
            30 => Some(Self::ThirtyDays),
            20 => Some(Self::TwentyDays),
            10 => Some(Self::TenDays),
            3 => Some(Self::ThreeDays),
            2 => Some(Self::TwoDays),
            1 => Some(Self::OneDay),
            0 => Some(Self::Expired),
            _ => None,
        }
    }

    /// The days-remaining value this tier fires on.
    pub fn threshold_days(&self) -> i64 {
        match self {
            Self::ThirtyDays => 30,
            Self::TwentyDays => 20,
            Self::TenDays => 10,
            Self::ThreeDays => 3,
            Self::TwoDays => 2,
            Self::OneDay => 1,
            Self::Expired => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThirtyDays => "30_days",
            Self::TwentyDays => "20_days",
            Self::TenDays => "10_days",
            Self::ThreeDays => "3_days",
            Self::TwoDays => "2_days",
            Self::OneDay => "1_day",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for NotificationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid notification tier: '{s}'")))
    }
}
