//! # vault-auth
//!
//! Credentials and tokens for Warranty Vault.
//!
//! - `jwt` — HS256 access/refresh token issue, validation and rotation
//! - `password` — Argon2id hashing and password policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
