//! HTTP surface — health check and the inbound-email webhook.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::pipeline::Pipeline;
use crate::pipeline::types::InboundEmail;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/inbound-email", post(inbound_email))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Inbound-email webhook.
///
/// The contract with the provider is "payload accepted for processing":
/// internal failures never change the response, and a payload we can't map
/// to our shape is logged and acknowledged all the same.
async fn inbound_email(State(state): State<AppState>, Json(payload): Json<Value>) -> Json<Value> {
    let acknowledgment = Json(json!({ "status": "processed" }));

    let inbound: InboundEmail = match serde_json::from_value(payload) {
        Ok(inbound) => inbound,
        Err(e) => {
            error!(error = %e, "Unmappable inbound payload");
            return acknowledgment;
        }
    };

    let report = state.pipeline.handle(inbound).await;
    debug!(
        request_id = %report.request_id,
        chunks = report.chunk_count,
        failed_chunks = report.failed_chunks,
        "Webhook request processed"
    );

    acknowledgment
}
