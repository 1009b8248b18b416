//! Warranty records, expiry reconciliation and receipt files.

pub mod expiry;
pub mod service;
pub mod storage;

pub use expiry::reconcile_expiry;
pub use service::{CreateWarranty, WarrantyService, WarrantyStats};
pub use storage::ReceiptStorage;
