//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use vault_core::config::auth::AuthConfig;
use vault_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Verifies signature, expiry and token kind.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_kind(token, TokenType::Access)
    }

    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_kind(token, TokenType::Refresh)
    }

    fn decode_kind(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication("Token is invalid"),
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::authentication("Token has wrong type"));
        }
        Ok(claims)
    }
}
