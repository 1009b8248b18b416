//! Status derived from the expiry date and a reference day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Warranties expiring within this many days (inclusive) are "Expiring Soon".
pub const EXPIRING_SOON_WINDOW_DAYS: i64 = 30;

/// Derived warranty status. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarrantyStatus {
    Active,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    Expired,
}

impl WarrantyStatus {
    /// Status of a warranty expiring on `expiry` as seen on `today`. A missing
    /// expiry date is treated as active.
    pub fn on(expiry: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(expiry) = expiry else {
            return Self::Active;
        };
        if expiry < today {
            Self::Expired
        } else if (expiry - today).num_days() <= EXPIRING_SOON_WINDOW_DAYS {
            Self::ExpiringSoon
        } else {
            Self::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Expired => "Expired",
        }
    }
}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whole days until expiry; 0 once expired or when no expiry is known.
pub fn days_remaining(expiry: Option<NaiveDate>, today: NaiveDate) -> i64 {
    match expiry {
        Some(expiry) if expiry >= today => (expiry - today).num_days(),
        _ => 0,
    }
}
