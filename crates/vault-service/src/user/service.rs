//! Account lifecycle and token issuance.

use std::sync::Arc;

use tracing::{info, warn};

use vault_auth::{JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, TokenPair};
use vault_core::config::auth::AuthConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_database::store::UserStore;
use vault_entity::user::{CreateUser, UpdateProfile, User};

use crate::context::RequestContext;

const NAME_MAX: usize = 150;
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH: &str = "Invalid or expired refresh token";

/// Sign-up form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirm: String,
}

/// A user together with a fresh token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

/// Registers users, checks credentials and issues tokens.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            encoder: Arc::new(JwtEncoder::new(config)),
            decoder: Arc::new(JwtDecoder::new(config)),
        }
    }

    pub async fn register(&self, form: Registration) -> AppResult<AuthSession> {
        let email = normalize_email(&form.email);
        if !looks_like_email(&email) {
            return Err(AppError::validation("Enter a valid email address"));
        }
        let name = validate_name(&form.name)?;
        self.validator
            .validate(&form.password, &form.password_confirm, &[&email, &name])?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("A user with this email already exists"));
        }

        let password_hash = self.hasher.hash_password(&form.password)?;
        let user = self
            .users
            .create(CreateUser {
                email,
                name,
                password_hash,
            })
            .await?;
        let tokens = self.encoder.issue_pair(user.id, &user.email)?;

        info!(user_id = %user.id, "User registered");
        Ok(AuthSession { user, tokens })
    }

    /// Every failure reads the same so accounts cannot be probed.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };
        if !user.can_login() {
            warn!(user_id = %user.id, "Login attempt on inactive account");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }
        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let tokens = self.encoder.issue_pair(user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession { user, tokens })
    }

    /// Exchange a refresh token for a new pair; the refresh token rotates.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let claims = self
            .decoder
            .decode_refresh_token(refresh_token)
            .map_err(|_| AppError::authentication(INVALID_REFRESH))?;
        let user = self
            .users
            .find_by_id(claims.user_id())
            .await?
            .filter(User::can_login)
            .ok_or_else(|| AppError::authentication(INVALID_REFRESH))?;
        self.encoder.issue_pair(user.id, &user.email)
    }

    /// Verify an access token and build the request context from it.
    pub fn authenticate(&self, access_token: &str) -> AppResult<RequestContext> {
        let claims = self.decoder.decode_access_token(access_token)?;
        Ok(RequestContext::new(claims.user_id(), claims.email))
    }

    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    pub async fn update_profile(&self, ctx: &RequestContext, mut changes: UpdateProfile) -> AppResult<User> {
        if let Some(name) = changes.name.as_deref() {
            changes.name = Some(validate_name(name)?);
        }
        if let Some(Some(avatar)) = changes.avatar.as_ref() {
            if avatar.trim().is_empty() {
                changes.avatar = Some(None);
            }
        }
        self.profile(ctx).await?;
        let user = self.users.update_profile(ctx.user_id, &changes).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if name.chars().count() > NAME_MAX {
        return Err(AppError::validation(format!("Name must be at most {NAME_MAX} characters")));
    }
    Ok(name.to_string())
}
