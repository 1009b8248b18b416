//! Scheduled job implementations.

pub mod expiry;

pub use expiry::ExpiryCheckJob;
