use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::engine::chat::{Intent, respond};
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let loads = state.loads.snapshot();
    let in_progress = state.stats().shipments_in_progress.max(0) as usize;
    let response = respond(&request, &loads, in_progress);

    let intent = Intent::detect(&request.message);
    state
        .metrics
        .chat_requests_total
        .with_label_values(&[intent.label()])
        .inc();

    tracing::debug!(
        session_id = %response.session_id,
        intent = intent.label(),
        found = response.cargas_encontradas.len(),
        "chat reply"
    );

    Json(response)
}
