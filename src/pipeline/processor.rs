//! Pipeline orchestrator — drives one inbound email to `Done`.
//!
//! Flow per request, strictly linear, each stage attempted exactly once:
//! 1. Chunk the body (pure)
//! 2. Summarize chunks sequentially in index order
//! 3. Merge partials (pass-through for a single chunk)
//! 4. Sanitize, compose, deliver
//!
//! **No external failure escapes.** Completion failures degrade to
//! empty/placeholder content, delivery failures are logged in the report —
//! the webhook caller is always acknowledged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::email::compose::Composer;
use crate::email::postmark::{DeliveryOutcome, EmailDelivery};
use crate::llm::CompletionBackend;
use crate::pipeline::chunk::chunk;
use crate::pipeline::merge::merge;
use crate::pipeline::sanitize::sanitize;
use crate::pipeline::summarize::summarize_chunk;
use crate::pipeline::types::{InboundEmail, Stage};

/// What happened to one request. Purely informational — every request ends
/// at `Done` and is acknowledged the same way.
#[derive(Debug)]
pub struct PipelineReport {
    pub request_id: Uuid,
    pub chunk_count: usize,
    pub failed_chunks: usize,
    /// `None` when nothing was sent (empty body, no recipient, or transport
    /// failure); otherwise the provider's reported outcome.
    pub delivery: Option<DeliveryOutcome>,
    pub processed_at: DateTime<Utc>,
}

impl PipelineReport {
    fn new(request_id: Uuid, chunk_count: usize, failed_chunks: usize) -> Self {
        Self {
            request_id,
            chunk_count,
            failed_chunks,
            delivery: None,
            processed_at: Utc::now(),
        }
    }
}

/// The request handler behind the webhook. Holds only read-only
/// configuration and clients, so instances are shared freely across
/// concurrent requests.
pub struct Pipeline {
    completion: Arc<dyn CompletionBackend>,
    delivery: Arc<dyn EmailDelivery>,
    composer: Composer,
    max_tokens_per_chunk: usize,
}

impl Pipeline {
    pub fn new(
        completion: Arc<dyn CompletionBackend>,
        delivery: Arc<dyn EmailDelivery>,
        composer: Composer,
        max_tokens_per_chunk: usize,
    ) -> Self {
        Self {
            completion,
            delivery,
            composer,
            max_tokens_per_chunk,
        }
    }

    /// Process one inbound email end to end. Infallible by design: failures
    /// are absorbed into the report.
    pub async fn handle(&self, inbound: InboundEmail) -> PipelineReport {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("pipeline", %request_id);
        self.run(request_id, inbound).instrument(span).await
    }

    async fn run(&self, request_id: Uuid, inbound: InboundEmail) -> PipelineReport {
        info!(
            stage = Stage::Received.label(),
            sender = inbound.sender_email().unwrap_or("<none>"),
            body_chars = inbound.text_body.chars().count(),
            "Inbound email received"
        );

        let chunks = chunk(&inbound.text_body, self.max_tokens_per_chunk);
        if chunks.is_empty() {
            // Nothing to summarize; the merger must not see an empty sequence.
            info!(stage = Stage::Done.label(), "Empty body, nothing to summarize");
            return PipelineReport::new(request_id, 0, 0);
        }
        info!(
            stage = Stage::Chunked.label(),
            chunks = chunks.len(),
            "Body chunked"
        );

        // Sequential, in chunk-index order, so the merger receives partials
        // already ordered and never re-sorts.
        let total = chunks.len();
        let mut partials = Vec::with_capacity(total);
        for chunk in &chunks {
            info!(
                stage = Stage::Summarizing.label(),
                chunk = chunk.index,
                of = total,
                chars = chunk.char_len,
                "Summarizing chunk"
            );
            partials.push(summarize_chunk(self.completion.as_ref(), chunk).await);
        }
        let failed_chunks = partials.iter().filter(|p| !p.outcome.is_ok()).count();
        if failed_chunks > 0 {
            warn!(failed_chunks, total, "Some chunks failed to summarize");
        }

        info!(stage = Stage::Merging.label(), partials = partials.len(), "Merging partials");
        let merged = merge(self.completion.as_ref(), &partials).await;
        // Merge output may reintroduce fences independently of the per-chunk
        // pass; sanitizing twice is a no-op when it didn't.
        let final_html = sanitize(&merged);

        let mut report = PipelineReport::new(request_id, total, failed_chunks);

        let Some(recipient) = inbound.sender_email() else {
            warn!(
                stage = Stage::Done.label(),
                "No sender address in payload, skipping delivery"
            );
            return report;
        };

        info!(stage = Stage::Composing.label(), "Composing summary email");
        let message = self
            .composer
            .compose(&final_html, recipient, inbound.subject.as_deref());

        info!(stage = Stage::Notifying.label(), to = recipient, "Delivering summary");
        report.delivery = match self.delivery.send(&message).await {
            Ok(outcome) => {
                if !outcome.success {
                    warn!(
                        status = outcome.status_code,
                        body = %outcome.body,
                        "Delivery reported failure"
                    );
                }
                Some(outcome)
            }
            Err(e) => {
                error!(error = %e, "Delivery call failed");
                None
            }
        };

        info!(
            stage = Stage::Done.label(),
            chunks = report.chunk_count,
            failed_chunks = report.failed_chunks,
            delivered = report.delivery.as_ref().is_some_and(|d| d.success),
            "Pipeline complete"
        );
        report
    }
}
