//! Accounts: registration, login, token refresh and profile.

pub mod service;

pub use service::{AccountService, AuthSession, Registration};
