//! Development sender that writes emails to the log.

use async_trait::async_trait;
use tracing::info;

use vault_core::result::AppResult;

use super::{EmailSender, OutgoingEmail};

#[derive(Debug, Clone)]
pub struct LogEmailSender {
    from: String,
}

impl LogEmailSender {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        info!(
            from = %self.from,
            to = %email.to,
            subject = %email.subject,
            body = %email.text,
            has_html = email.html.is_some(),
            "Email (log provider)"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
