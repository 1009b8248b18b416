//! # vault-service
//!
//! Business logic for Warranty Vault. Each service owns its collaborators
//! behind `Arc`s handed in at construction: store traits from
//! `vault-database`, the clock from `vault-core`, and the outbound
//! channels (email, OCR) defined here.

pub mod context;
pub mod delivery;
pub mod notification;
pub mod receipt;
pub mod user;
pub mod warranty;

pub use context::RequestContext;
pub use delivery::{EmailSender, OutgoingEmail};
pub use notification::{ExpirySweep, NotificationService, SweepReport};
pub use receipt::{ReceiptScan, ReceiptScanner, TextExtractor};
pub use user::{AccountService, AuthSession, Registration};
pub use warranty::{CreateWarranty, ReceiptStorage, WarrantyService, WarrantyStats};
