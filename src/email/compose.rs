//! Email composer — wraps the final summary into a deliverable message.
//!
//! Email clients have unpredictable CSS support, so the document is fully
//! self-contained: inline styles only, no external stylesheets or scripts.

/// Subject used when the inbound email had none.
pub const DEFAULT_SUBJECT: &str = "Your thread summary";

/// Plain-text fallback for clients that cannot render HTML.
const TEXT_FALLBACK: &str = "This message contains an automatically generated \
summary of your email thread. Please view it in an HTML-capable email client.";

/// A composed outbound message, ready for the notifier. Constructed once,
/// sent once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    /// Delivery-channel tag (Postmark message stream).
    pub stream: String,
}

/// Builds outbound messages from final summaries. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct Composer {
    pub from_address: String,
    pub message_stream: String,
}

impl Composer {
    pub fn new(from_address: impl Into<String>, message_stream: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            message_stream: message_stream.into(),
        }
    }

    /// Wrap `summary_html` in the fixed document and address it to
    /// `recipient`, threading the subject off the inbound one when present.
    pub fn compose(
        &self,
        summary_html: &str,
        recipient: &str,
        inbound_subject: Option<&str>,
    ) -> OutboundEmail {
        OutboundEmail {
            from: self.from_address.clone(),
            to: recipient.to_string(),
            subject: reply_subject(inbound_subject),
            html_body: render_document(summary_html),
            text_body: TEXT_FALLBACK.to_string(),
            stream: self.message_stream.clone(),
        }
    }
}

/// Derive the outbound subject from the inbound one.
///
/// `Re:` is prepended unless already present (case-insensitively); a missing
/// or blank inbound subject falls back to the fixed default.
pub fn reply_subject(inbound_subject: Option<&str>) -> String {
    match inbound_subject.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subject) if subject.to_lowercase().starts_with("re:") => subject.to_string(),
        Some(subject) => format!("Re: {subject}"),
        None => DEFAULT_SUBJECT.to_string(),
    }
}

/// Render the fixed, self-contained HTML document around the summary
/// fragment: header banner, content card, footer attribution.
fn render_document(summary_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body style="margin:0;padding:0;background-color:#f4f4f7;font-family:Helvetica,Arial,sans-serif;">
  <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
    <tr><td align="center" style="padding:24px 12px;">
      <table role="presentation" width="600" cellpadding="0" cellspacing="0" style="background-color:#ffffff;border-radius:8px;overflow:hidden;">
        <tr><td style="background-color:#2b6cb0;padding:20px 32px;">
          <h1 style="margin:0;color:#ffffff;font-size:20px;">Thread Recap</h1>
        </td></tr>
        <tr><td style="padding:24px 32px;color:#2d3748;font-size:15px;line-height:1.6;">
{summary_html}
        </td></tr>
        <tr><td style="padding:16px 32px;border-top:1px solid #e2e8f0;">
          <p style="margin:0;color:#a0aec0;font-size:12px;">Summarized automatically by Thread Recap.</p>
        </td></tr>
      </table>
    </td></tr>
  </table>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> Composer {
        Composer::new("recap@threadrecap.app", "outbound")
    }

    #[test]
    fn compose_wraps_summary_in_document() {
        let msg = composer().compose("<h2>Timeline</h2>", "alice@example.com", None);
        assert!(msg.html_body.contains("<h2>Timeline</h2>"));
        assert!(msg.html_body.contains("Thread Recap"));
        assert!(msg.html_body.contains("Summarized automatically"));
        assert!(msg.html_body.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn compose_has_no_external_references() {
        let msg = composer().compose("<p>x</p>", "alice@example.com", None);
        assert!(!msg.html_body.contains("<link"));
        assert!(!msg.html_body.contains("<script"));
    }

    #[test]
    fn compose_sets_addresses_stream_and_fallback() {
        let msg = composer().compose("<p>x</p>", "alice@example.com", None);
        assert_eq!(msg.from, "recap@threadrecap.app");
        assert_eq!(msg.to, "alice@example.com");
        assert_eq!(msg.stream, "outbound");
        assert!(!msg.text_body.is_empty());
        assert!(!msg.text_body.contains('<'));
    }

    #[test]
    fn compose_is_deterministic() {
        let a = composer().compose("<p>x</p>", "a@b.c", Some("Hi"));
        let b = composer().compose("<p>x</p>", "a@b.c", Some("Hi"));
        assert_eq!(a, b);
    }

    #[test]
    fn reply_subject_threads_off_inbound() {
        assert_eq!(reply_subject(Some("Budget plan")), "Re: Budget plan");
    }

    #[test]
    fn reply_subject_keeps_existing_re_prefix() {
        assert_eq!(reply_subject(Some("Re: Budget plan")), "Re: Budget plan");
        assert_eq!(reply_subject(Some("RE: Budget plan")), "RE: Budget plan");
    }

    #[test]
    fn reply_subject_defaults_when_missing_or_blank() {
        assert_eq!(reply_subject(None), DEFAULT_SUBJECT);
        assert_eq!(reply_subject(Some("   ")), DEFAULT_SUBJECT);
    }
}
