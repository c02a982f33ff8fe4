use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::routing::get;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::carrier::Carrier;
use crate::models::shipment::{Shipment, ShipmentFilter};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/envios", get(list_shipments))
        .route("/api/transportistas", get(list_carriers))
}

#[derive(Deserialize)]
pub struct ShipmentParams {
    pub estado: Option<String>,
}

#[derive(Serialize)]
pub struct ShipmentList {
    pub envios: Vec<Shipment>,
}

async fn list_shipments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ShipmentParams>,
) -> Result<Json<ShipmentList>, AppError> {
    let raw = params.estado.unwrap_or_default();
    let filter = ShipmentFilter::parse(&raw)
        .ok_or_else(|| AppError::BadRequest(format!("unknown estado: {raw}")))?;

    let envios = state
        .shipments
        .snapshot()
        .into_iter()
        .filter(|shipment| filter.matches(shipment))
        .collect();

    Ok(Json(ShipmentList { envios }))
}

#[derive(Serialize)]
pub struct CarrierList {
    pub transportistas: Vec<Carrier>,
}

async fn list_carriers(State(state): State<Arc<AppState>>) -> Json<CarrierList> {
    Json(CarrierList {
        transportistas: state.carriers.snapshot(),
    })
}
