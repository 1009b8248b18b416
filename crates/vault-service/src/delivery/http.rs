//! JSON-over-HTTP mail relay sender.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use vault_core::config::email::EmailConfig;
use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;

use super::{EmailSender, OutgoingEmail};

/// Posts `{from, to, subject, text, html}` to a relay with a bearer key.
#[derive(Debug, Clone)]
pub struct HttpEmailSender {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

impl HttpEmailSender {
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        if config.http.endpoint.trim().is_empty() {
            return Err(AppError::configuration(
                "email.http.endpoint must be set when email.provider = \"http\"",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            endpoint: config.http.endpoint.clone(),
            api_key: config.http.api_key.clone(),
            from: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        let payload = RelayPayload {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            text: &email.text,
            html: email.html.as_deref(),
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Email relay unreachable", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external(format!(
                "Email relay rejected message with status {status}"
            )));
        }

        debug!(to = %email.to, status = %status, "Email accepted by relay");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault_core::config::email::HttpEmailConfig;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(endpoint: String) -> EmailConfig {
        EmailConfig {
            provider: "http".into(),
            from_address: "Warranty Vault <noreply@example.com>".into(),
            http: HttpEmailConfig {
                endpoint,
                api_key: "relay-key".into(),
                timeout_seconds: 5,
            },
        }
    }

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: "owner@example.com".into(),
            subject: "Warranty Expired - Laptop".into(),
            text: "body".into(),
            html: Some("<p>body</p>".into()),
        }
    }

    #[tokio::test]
    async fn posts_payload_with_bearer_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(header("authorization", "Bearer relay-key"))
            .and(body_partial_json(serde_json::json!({
                "to": "owner@example.com",
                "subject": "Warranty Expired - Laptop",
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let sender = HttpEmailSender::new(&config(format!("{}/send", server.uri()))).expect("sender");
        sender.send(&email()).await.expect("send");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let sender = HttpEmailSender::new(&config(server.uri())).expect("sender");
        let err = sender.send(&email()).await.expect_err("should fail");
        assert_eq!(err.kind, ErrorKind::ExternalService);
    }
}
