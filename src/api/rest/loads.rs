use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::acceptance::accept_load;
use crate::engine::filter::KindFilter;
use crate::engine::search::{SearchPage, SearchParams, search_board};
use crate::error::AppError;
use crate::models::load::{Coords, Load, LoadKind};
use crate::models::shipment::Shipment;
use crate::state::AppState;

const MAX_PAGE_SIZE: usize = 100;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/cargas", get(list_loads).post(publish_load))
        .route("/api/cargas/search", get(search_loads))
        .route("/api/cargas/accept/:id", post(accept))
}

#[derive(Deserialize)]
pub struct ListParams {
    pub tipo: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Serialize)]
pub struct LoadPage {
    pub cargas: Vec<Load>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

async fn list_loads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<LoadPage>, AppError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(50);

    if page == 0 {
        return Err(AppError::BadRequest("page must be >= 1".to_string()));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }

    let kind = match params.tipo.as_deref() {
        Some(raw) => KindFilter::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown tipo: {raw}")))?,
        None => KindFilter::All,
    };

    let matching: Vec<Load> = state
        .loads
        .snapshot()
        .into_iter()
        .filter(|load| kind.admits(load.kind))
        .collect();

    // a page past the end, however large, is just empty
    let cargas = match (page - 1).checked_mul(page_size) {
        Some(offset) => matching
            .iter()
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    Ok(Json(LoadPage {
        cargas,
        total: matching.len(),
        page,
        page_size,
    }))
}

#[derive(Deserialize)]
pub struct PublishLoadRequest {
    pub id: Option<String>,
    pub origen: String,
    pub destino: String,
    #[serde(default)]
    pub origen_coords: Coords,
    #[serde(default)]
    pub destino_coords: Coords,
    pub peso: f64,
    pub distancia: f64,
    pub precio: f64,
    pub tipo: LoadKind,
    #[serde(default)]
    pub descripcion: String,
}

async fn publish_load(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PublishLoadRequest>,
) -> Result<Json<Load>, AppError> {
    let load = Load {
        id: payload
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        origin: payload.origen,
        destination: payload.destino,
        origin_coords: payload.origen_coords,
        destination_coords: payload.destino_coords,
        weight_tons: payload.peso,
        distance_km: payload.distancia,
        price: payload.precio,
        kind: payload.tipo,
        description: payload.descripcion,
    };

    state.publish_load(load.clone())?;
    tracing::info!(load_id = %load.id, origin = %load.origin, destination = %load.destination, "carga published");

    Ok(Json(load))
}

async fn search_loads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchPage>, AppError> {
    Ok(Json(search_board(&state, &params, "rest")?))
}

#[derive(Deserialize)]
pub struct AcceptRequest {
    pub transportista: Option<String>,
}

#[derive(Serialize)]
pub struct AcceptResponse {
    pub message: &'static str,
    pub envio: Shipment,
}

async fn accept(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Option<Json<AcceptRequest>>,
) -> Result<Json<AcceptResponse>, AppError> {
    let carrier = payload.and_then(|Json(body)| body.transportista);
    let envio = accept_load(&state, &id, carrier.as_deref())?;

    Ok(Json(AcceptResponse {
        message: "Carga aceptada",
        envio,
    }))
}
