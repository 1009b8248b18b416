//! Convenience result type alias for Warranty Vault.

use crate::error::AppError;

/// A specialized `Result` type for Vault operations.
pub type AppResult<T> = Result<T, AppError>;
