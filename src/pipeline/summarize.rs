//! Chunk summarizer — one structured partial summary per chunk.

use crate::llm::{CompletionBackend, prompts};
use crate::pipeline::sanitize::sanitize;
use crate::pipeline::types::{Chunk, PartialSummary, SummaryOutcome};

/// Request a partial summary for one chunk.
///
/// A failed completion call never propagates: it is logged and recorded as
/// `SummaryOutcome::Failed`, so the rest of the pipeline proceeds with
/// partial results. Exactly one attempt is made here — retry, if any, is the
/// backend's bounded policy.
pub async fn summarize_chunk(backend: &dyn CompletionBackend, chunk: &Chunk) -> PartialSummary {
    let prompt = prompts::chunk_prompt(&chunk.text);

    let outcome = match backend.complete(&prompt).await {
        Ok(raw) => SummaryOutcome::Ok(sanitize(&raw)),
        Err(e) => {
            tracing::error!(chunk = chunk.index, error = %e, "Chunk summarization failed");
            SummaryOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    PartialSummary {
        chunk_index: chunk.index,
        outcome,
    }
}
