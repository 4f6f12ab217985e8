//! Notifier — delivers composed emails through the Postmark API.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::email::compose::OutboundEmail;
use crate::error::DeliveryError;

const POSTMARK_EMAIL_URL: &str = "https://api.postmarkapp.com/email";

/// Hard ceiling on the send call; delivery must never block indefinitely.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Outcome of one delivery attempt.
///
/// Provider-specific status and body are reported verbatim, not interpreted.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub status_code: u16,
    pub body: String,
}

/// Seam between the pipeline and the email provider.
#[async_trait]
pub trait EmailDelivery: Send + Sync {
    /// Send `message`. A non-2xx provider response is reported in the
    /// outcome, not raised; `Err` is reserved for transport-level failures
    /// and missing credentials.
    async fn send(&self, message: &OutboundEmail) -> Result<DeliveryOutcome, DeliveryError>;
}

/// Postmark transactional-send client.
pub struct PostmarkClient {
    http: reqwest::Client,
    token: Option<SecretString>,
}

impl PostmarkClient {
    pub fn new(token: Option<SecretString>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }
}

#[async_trait]
impl EmailDelivery for PostmarkClient {
    async fn send(&self, message: &OutboundEmail) -> Result<DeliveryOutcome, DeliveryError> {
        let token = self.token.as_ref().ok_or(DeliveryError::MissingToken)?;

        let payload = serde_json::json!({
            "From": message.from,
            "To": message.to,
            "Subject": message.subject,
            "HtmlBody": message.html_body,
            "TextBody": message.text_body,
            "MessageStream": message.stream,
        });

        let response = self
            .http
            .post(POSTMARK_EMAIL_URL)
            .header("Accept", "application/json")
            .header("X-Postmark-Server-Token", token.expose_secret())
            .timeout(SEND_TIMEOUT)
            .json(&payload)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let success = response.status().is_success();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());

        if success {
            tracing::info!(to = %message.to, status = status_code, "Summary email sent");
        } else {
            tracing::error!(to = %message.to, status = status_code, %body, "Postmark send failed");
        }

        Ok(DeliveryOutcome {
            success,
            status_code,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::compose::Composer;

    #[tokio::test]
    async fn missing_token_fails_without_network() {
        let client = PostmarkClient::new(None);
        let message = Composer::new("from@x.y", "outbound").compose("<p>s</p>", "to@x.y", None);
        let err = client.send(&message).await.unwrap_err();
        assert!(matches!(err, DeliveryError::MissingToken));
    }
}
