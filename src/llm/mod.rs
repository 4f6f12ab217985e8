//! Completion-service client.
//!
//! `CompletionBackend` is the seam the pipeline talks through; `OpenAiClient`
//! is the real implementation against the OpenAI chat-completions API. Tests
//! substitute stub backends.

pub mod prompts;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio_retry::Retry;
use tokio_retry::strategy::ExponentialBackoff;

use crate::error::CompletionError;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Estimate token count from text length (~4 characters per token).
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Bounded retry policy for completion calls.
///
/// Default is a single attempt — a failed call degrades locally instead of
/// retrying. Extra attempts, when configured, are spaced by exponential
/// backoff and hard-capped by `max_attempts`; there is no retry-until-success
/// path.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    /// Delay before the first retry, in milliseconds. Doubles per attempt.
    pub base_delay_ms: u64,
}

impl RetryPolicy {
    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            base_delay_ms: 500,
        }
    }
}

/// Seam between the pipeline and the completion service.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run `prompt` through the completion model and return the generated
    /// text from the first choice.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: Option<SecretString>,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(api_key: Option<SecretString>, model: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.into(),
            retry,
        }
    }

    async fn request_once(&self, key: &str, prompt: &str) -> Result<String, CompletionError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(CompletionError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("response contained no choices".into()))
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or(CompletionError::MissingApiKey)?
            .expose_secret()
            .to_string();

        tracing::debug!(
            model = %self.model,
            est_tokens = estimate_tokens(prompt),
            "sending completion request"
        );

        // from_millis(2) doubles per step; factor scales the first retry to
        // base_delay_ms. take(n-1) caps total attempts at max_attempts.
        let backoff = ExponentialBackoff::from_millis(2)
            .factor(self.retry.base_delay_ms / 2)
            .take(self.retry.max_attempts.saturating_sub(1));

        Retry::spawn(backoff, || self.request_once(&key, prompt)).await
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_tokens_is_roughly_chars_over_four() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens(&"a".repeat(400)), 101);
    }

    #[test]
    fn retry_policy_defaults_to_single_attempt() {
        assert_eq!(RetryPolicy::default().max_attempts, 1);
    }

    #[test]
    fn retry_policy_floors_attempts_at_one() {
        assert_eq!(RetryPolicy::with_max_attempts(0).max_attempts, 1);
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let client = OpenAiClient::new(None, "gpt-4o-mini", RetryPolicy::default());
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }

    #[test]
    fn completion_response_extracts_first_choice() {
        let parsed: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}},
            ]
        }))
        .unwrap();
        assert_eq!(parsed.choices[0].message.content, "first");
    }
}
