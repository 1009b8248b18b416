//! Password policy for new accounts.

use vault_core::config::auth::AuthConfig;
use vault_core::error::AppError;

/// Checks new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    enforce_strength: bool,
}

impl PasswordValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            enforce_strength: config.enforce_password_strength,
        }
    }

    /// Validate a password and its confirmation. `user_inputs` (email,
    /// name) are fed to the strength estimator so passwords built from
    /// them score low.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        user_inputs: &[&str],
    ) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::validation("Passwords don't match"));
        }

        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if self.enforce_strength {
            let estimate = zxcvbn::zxcvbn(password, user_inputs);
            if estimate.score() < zxcvbn::Score::Two {
                return Err(AppError::validation(
                    "Password is too weak. Please choose a less predictable password.",
                ));
            }
        }

        Ok(())
    }
}
