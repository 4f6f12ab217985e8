//! Shared types for the summarization pipeline.

use serde::Deserialize;

// ── Inbound email ───────────────────────────────────────────────────

/// Inbound email webhook payload (Postmark inbound shape).
///
/// Only the fields the pipeline reads are named; everything else in the
/// payload is kept opaquely in `extra` so future fields survive a round
/// through our types.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEmail {
    /// Structured sender (preferred source of the reply address).
    #[serde(rename = "FromFull", default)]
    pub from_full: Option<InboundSender>,
    /// Raw `From` header value, used when `FromFull` is absent.
    #[serde(rename = "From", default)]
    pub from: Option<String>,
    /// Subject line of the inbound thread.
    #[serde(rename = "Subject", default)]
    pub subject: Option<String>,
    /// Plain-text body of the thread. May be empty.
    #[serde(rename = "TextBody", default)]
    pub text_body: String,
    /// Provider message id.
    #[serde(rename = "MessageID", alias = "MessageId", default)]
    pub message_id: Option<String>,
    /// Latest reply with quoted history stripped, when the provider sends it.
    #[serde(rename = "StrippedTextReply", default)]
    pub stripped_text_reply: Option<String>,
    /// Unmodeled payload fields, passed through opaquely.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Sender block of the inbound payload.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSender {
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
}

impl InboundEmail {
    /// The address the summary is sent back to.
    ///
    /// Prefers `FromFull.Email`, falls back to the raw `From` header.
    /// Returns `None` when neither carries a usable address.
    pub fn sender_email(&self) -> Option<&str> {
        self.from_full
            .as_ref()
            .and_then(|s| s.email.as_deref())
            .or(self.from.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

// ── Chunks and partial summaries ────────────────────────────────────

/// A bounded contiguous slice of the original thread text.
///
/// Chunks are non-overlapping and their concatenation in index order
/// reconstructs the original body exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 1-based position in the original body.
    pub index: usize,
    /// The slice text.
    pub text: String,
    /// Length of `text` in characters (not bytes).
    pub char_len: usize,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        let char_len = text.chars().count();
        Self {
            index,
            text,
            char_len,
        }
    }
}

/// Result of summarizing one chunk.
///
/// An explicit outcome rather than an empty-string sentinel, so a failed
/// summarization can never collide with a legitimately empty summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Sanitized summary HTML for the chunk.
    Ok(String),
    /// The completion call failed; the chunk has no summary.
    Failed { reason: String },
}

impl SummaryOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, SummaryOutcome::Ok(_))
    }

    pub fn html(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Ok(html) => Some(html),
            SummaryOutcome::Failed { .. } => None,
        }
    }
}

/// The completion service's output for one chunk. Same cardinality and
/// ordering as the chunk sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialSummary {
    /// Index of the chunk this summary belongs to.
    pub chunk_index: usize,
    pub outcome: SummaryOutcome,
}

// ── Pipeline stages ─────────────────────────────────────────────────

/// Pipeline stages in execution order. Each transition is attempted exactly
/// once per request; `Done` is reached regardless of intermediate failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Chunked,
    Summarizing,
    Merging,
    Composing,
    Notifying,
    Done,
}

impl Stage {
    /// Short label for log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Received => "received",
            Stage::Chunked => "chunked",
            Stage::Summarizing => "summarizing",
            Stage::Merging => "merging",
            Stage::Composing => "composing",
            Stage::Notifying => "notifying",
            Stage::Done => "done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_email_prefers_from_full() {
        let inbound: InboundEmail = serde_json::from_value(serde_json::json!({
            "FromFull": {"Email": "alice@example.com", "Name": "Alice"},
            "From": "display-only@example.com",
            "TextBody": "hello",
        }))
        .unwrap();
        assert_eq!(inbound.sender_email(), Some("alice@example.com"));
    }

    #[test]
    fn sender_email_falls_back_to_from_header() {
        let inbound: InboundEmail = serde_json::from_value(serde_json::json!({
            "From": "bob@example.com",
            "TextBody": "hello",
        }))
        .unwrap();
        assert_eq!(inbound.sender_email(), Some("bob@example.com"));
    }

    #[test]
    fn sender_email_none_when_absent_or_blank() {
        let inbound: InboundEmail = serde_json::from_value(serde_json::json!({
            "From": "  ",
            "TextBody": "hello",
        }))
        .unwrap();
        assert_eq!(inbound.sender_email(), None);
    }

    #[test]
    fn payload_parses_with_only_unknown_fields() {
        let inbound: InboundEmail = serde_json::from_value(serde_json::json!({
            "Tag": "support",
            "Date": "Fri, 29 Aug 2026 10:00:00 +0000",
        }))
        .unwrap();
        assert!(inbound.text_body.is_empty());
        assert_eq!(inbound.sender_email(), None);
        assert!(inbound.extra.contains_key("Tag"));
    }

    #[test]
    fn chunk_char_len_counts_chars_not_bytes() {
        let chunk = Chunk::new(1, "héllo".to_string());
        assert_eq!(chunk.char_len, 5);
        assert!(chunk.text.len() > 5);
    }
}
