//! Expiry notifications: wording, the daily sweep, and owner access.

pub mod content;
pub mod engine;
pub mod service;

pub use engine::{ExpirySweep, SweepReport};
pub use service::NotificationService;
