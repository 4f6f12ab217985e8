//! Merger — combines partial summaries into one chronological summary.

use crate::llm::{CompletionBackend, prompts};
use crate::pipeline::sanitize::sanitize;
use crate::pipeline::types::{PartialSummary, SummaryOutcome};

/// Delivered verbatim as the final summary when the merge call fails, so the
/// recipient sees that something went wrong instead of receiving silence.
pub const MERGE_FAILURE_PLACEHOLDER: &str =
    "<p>We were unable to generate a summary for this thread. Please try again later.</p>";

/// Stands in for a chunk whose summarization failed, keeping the merge input
/// at the same cardinality and order as the chunk sequence.
const UNAVAILABLE_SEGMENT: &str = "(no summary was produced for this segment)";

/// Merge partial summaries into the final summary HTML.
///
/// A single-element sequence is returned unchanged with no network call —
/// re-summarizing an already-correct summary only costs money and risks
/// paraphrase drift. Multiple elements are fused through one completion call
/// over the index-tagged concatenation; on failure the fixed placeholder
/// becomes the final summary.
pub async fn merge(backend: &dyn CompletionBackend, partials: &[PartialSummary]) -> String {
    match partials {
        [] => String::new(),
        [only] => only.outcome.html().unwrap_or_default().to_string(),
        _ => {
            let combined = combine_partials(partials);
            match backend.complete(&prompts::merge_prompt(&combined)).await {
                Ok(raw) => sanitize(&raw),
                Err(e) => {
                    tracing::error!(partials = partials.len(), error = %e, "Merge failed");
                    MERGE_FAILURE_PLACEHOLDER.to_string()
                }
            }
        }
    }
}

/// Concatenate all partial summaries, each tagged with its 1-based chunk
/// index, in increasing index order. Failed chunks keep their slot.
fn combine_partials(partials: &[PartialSummary]) -> String {
    let mut combined = String::new();
    for partial in partials {
        combined.push_str(&format!(
            "[Chunk {}]\n{}\n\n",
            partial.chunk_index,
            partial.outcome.html().unwrap_or(UNAVAILABLE_SEGMENT)
        ));
    }
    combined
}
