//! Service configuration, built from environment variables.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Fixed characters-per-token conversion estimate used by the chunker.
pub const CHARS_PER_TOKEN: usize = 4;

/// Runtime configuration.
///
/// API keys are optional at startup: their absence only surfaces as an error
/// on the first call that needs them. Everything else falls back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Completion-service API key (`OPENAI_API_KEY`).
    pub openai_api_key: Option<SecretString>,
    /// Postmark server token (`POSTMARK_SERVER_TOKEN`).
    pub postmark_token: Option<SecretString>,
    /// Completion model identifier.
    pub model: String,
    /// Sender address for outbound summary emails.
    pub from_address: String,
    /// Postmark message stream for outbound delivery.
    pub message_stream: String,
    /// Per-chunk token budget for the chunker.
    pub max_tokens_per_chunk: usize,
    /// Maximum completion attempts per call (1 = no retry).
    pub llm_max_attempts: usize,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Missing variables get defaults; variables that are present but not
    /// parseable are a hard error so a typo doesn't silently change budgets.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = parse_env("PORT", 8000)?;

        Ok(Self {
            bind_addr: format!("0.0.0.0:{port}"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().map(SecretString::from),
            postmark_token: std::env::var("POSTMARK_SERVER_TOKEN")
                .ok()
                .map(SecretString::from),
            model: std::env::var("RECAP_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            from_address: std::env::var("RECAP_FROM_ADDRESS")
                .unwrap_or_else(|_| "recap@threadrecap.app".to_string()),
            message_stream: std::env::var("RECAP_MESSAGE_STREAM")
                .unwrap_or_else(|_| "outbound".to_string()),
            max_tokens_per_chunk: parse_env("RECAP_MAX_TOKENS_PER_CHUNK", 100_000)?,
            llm_max_attempts: parse_env("RECAP_LLM_MAX_ATTEMPTS", 1)?,
        })
    }
}

/// Parse an env var, defaulting when unset and erroring when unparseable.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{e}"),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_default_when_unset() {
        let value: usize = parse_env("RECAP_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
