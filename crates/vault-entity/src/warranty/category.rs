//! Product category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vault_core::AppError;

/// Product category of a warranty. Labels are stored and serialized as the
/// human-readable names.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "warranty_category")]
pub enum WarrantyCategory {
    Electronics,
    #[serde(rename = "Home Appliances")]
    #[sqlx(rename = "Home Appliances")]
    HomeAppliances,
    Furniture,
    Automotive,
    Accessories,
    #[default]
    Other,
}

impl WarrantyCategory {
    /// Every category in declaration order.
    pub const ALL: [WarrantyCategory; 6] = [
        Self::Electronics,
        Self::HomeAppliances,
        Self::Furniture,
        Self::Automotive,
        Self::Accessories,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::HomeAppliances => "Home Appliances",
            Self::Furniture => "Furniture",
            Self::Automotive => "Automotive",
            Self::Accessories => "Accessories",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for WarrantyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WarrantyCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid category: '{s}'. Expected one of: Electronics, Home Appliances, \
                     Furniture, Automotive, Accessories, Other"
                ))
            })
    }
}
