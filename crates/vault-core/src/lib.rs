//! # vault-core
//!
//! Core crate for Warranty Vault. Contains configuration schemas, typed
//! identifiers, pagination types, the clock abstraction used for every
//! "today" computation, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Vault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
