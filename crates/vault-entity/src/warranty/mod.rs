//! Warranty domain entities and the date rules derived from them.

pub mod category;
pub mod model;
pub mod period;
pub mod status;

pub use category::WarrantyCategory;
pub use model::{NewWarranty, Warranty, WarrantyChanges};
pub use period::{PeriodUnit, checked_expiry, compute_expiry};
pub use status::{EXPIRING_SOON_WINDOW_DAYS, WarrantyStatus, days_remaining};
