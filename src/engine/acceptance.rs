use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::notification::Notification;
use crate::models::shipment::{DEFAULT_CARRIER, Shipment};
use crate::state::AppState;

/// Moves a load off the board into a new pending-pickup shipment.
///
/// The load is taken with a single atomic removal, so concurrent accepts of
/// the same id produce exactly one shipment; the losers get `NotFound`.
pub fn accept_load(
    state: &AppState,
    load_id: &str,
    carrier: Option<&str>,
) -> Result<Shipment, AppError> {
    let Some(load) = state.loads.remove(load_id) else {
        state
            .metrics
            .loads_accepted_total
            .with_label_values(&["not_found"])
            .inc();
        warn!(load_id, "accept requested for unknown carga");
        return Err(AppError::NotFound(format!("carga {load_id} not found")));
    };

    let carrier = carrier
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_CARRIER);
    let shipment = Shipment::from_accepted(Uuid::new_v4().to_string(), &load, carrier);

    state
        .shipments
        .push_front(shipment.id.clone(), shipment.clone());
    state.refresh_gauges();
    state
        .metrics
        .loads_accepted_total
        .with_label_values(&["accepted"])
        .inc();

    state.notify(Notification::load_accepted(&load.origin, &load.destination));

    info!(
        load_id,
        shipment_id = %shipment.id,
        carrier,
        "carga accepted"
    );

    Ok(shipment)
}
