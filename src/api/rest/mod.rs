pub mod chat;
pub mod invoices;
pub mod loads;
pub mod shipments;
pub mod ws;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::AppError;
use crate::models::notification::Notification;
use crate::models::stats::MarketStats;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(loads::router())
        .merge(shipments::router())
        .merge(invoices::router())
        .merge(chat::router())
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/stats", get(stats))
        .route("/api/notificaciones", get(notifications))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
}

/// `*` opens the API to any origin; otherwise only the listed ones.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, AppError> {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return Ok(base.allow_origin(Any));
    }

    let parsed = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|err| AppError::Internal(format!("invalid CORS origin {origin}: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(base.allow_origin(AllowOrigin::list(parsed)))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Carga Platform API v2.0",
        "status": "ok"
    }))
}

async fn stats(State(state): State<Arc<AppState>>) -> Json<MarketStats> {
    Json(state.stats())
}

async fn notifications(State(state): State<Arc<AppState>>) -> Json<Vec<Notification>> {
    Json(state.recent_notifications())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    cargas: usize,
    envios: usize,
    transportistas: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cargas: state.loads.len(),
        envios: state.shipments.len(),
        transportistas: state.carriers.len(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
