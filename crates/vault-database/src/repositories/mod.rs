//! sqlx repository implementations of the store traits.

pub mod notification;
pub mod user;
pub mod warranty;

pub use notification::NotificationRepository;
pub use user::UserRepository;
pub use warranty::WarrantyRepository;

use vault_core::error::{AppError, ErrorKind};

/// Map an insert failure, turning unique violations into `Conflict`.
pub(crate) fn insert_error(err: sqlx::Error, conflict: &str, failure: &str) -> AppError {
    let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    if is_unique {
        AppError::with_source(ErrorKind::Conflict, conflict, err)
    } else {
        AppError::with_source(ErrorKind::Database, failure, err)
    }
}
