//! Outbound email for expiry notices.
//!
//! Delivery is best-effort: callers log failures and carry on, so a
//! sender only has to report success or an error.

pub mod http;
pub mod log;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use vault_core::config::email::EmailConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;

pub use self::http::HttpEmailSender;
pub use self::log::LogEmailSender;

/// A rendered email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// A transport that can deliver one email.
#[async_trait]
pub trait EmailSender: Send + Sync + 'static {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}

/// Sender that refuses everything; selected by `email.provider = "disabled"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledEmailSender;

#[async_trait]
impl EmailSender for DisabledEmailSender {
    async fn send(&self, _email: &OutgoingEmail) -> AppResult<()> {
        Err(AppError::service_unavailable("Email delivery is disabled"))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Build the sender named by `config.provider`.
pub fn build_sender(config: &EmailConfig) -> AppResult<Arc<dyn EmailSender>> {
    match config.provider.as_str() {
        "log" => Ok(Arc::new(LogEmailSender::new(&config.from_address))),
        "http" => Ok(Arc::new(HttpEmailSender::new(config)?)),
        "disabled" => Ok(Arc::new(DisabledEmailSender)),
        other => Err(AppError::configuration(format!(
            "Unknown email provider '{other}'. Expected one of: log, http, disabled"
        ))),
    }
}
