//! Output sanitizer — strips code-fence artifacts from completion output.
//!
//! Models occasionally wrap HTML in a Markdown fence despite instructions.
//! Both the per-chunk and merge responses can reintroduce fences, so this
//! runs after every completion call.

use std::sync::LazyLock;

use regex::Regex;

/// A fence delimiter, optionally tagged with a language hint (```` ```html ````).
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)```[a-z0-9]*").unwrap());

/// Remove every code-fence marker, case-insensitively, and trim whitespace.
///
/// Idempotent: sanitizing already-clean output is a no-op.
pub fn sanitize(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}
