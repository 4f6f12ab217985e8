//! Error types for Thread Recap.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Completion-service errors.
///
/// A missing API key is reported here, at the call site, rather than at
/// startup — the service boots without credentials and degrades per request.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion service returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    InvalidResponse(String),
}

/// Email-delivery errors.
///
/// Only transport-level failures live here. A non-2xx provider response is
/// not an error — the notifier reports it in the `DeliveryOutcome`.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("POSTMARK_SERVER_TOKEN is not set")]
    MissingToken,

    #[error("Email send request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;
