//! # vault-entity
//!
//! Domain entity models for Warranty Vault. Each struct here is either a
//! database row (deriving `sqlx::FromRow`) or a domain value object. The
//! date arithmetic for expiry dates and the days-remaining tier table also
//! live here because they are pure functions of entity fields.

pub mod notification;
pub mod user;
pub mod warranty;
