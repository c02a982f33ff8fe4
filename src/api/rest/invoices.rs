use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::routing::get;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::invoice::{Invoice, InvoiceStatus, InvoiceTotals, filter_invoices, totals};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/facturas", get(list_invoices))
}

#[derive(Deserialize)]
pub struct InvoiceParams {
    pub estado: Option<String>,
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct InvoiceList {
    pub facturas: Vec<Invoice>,
    pub totales: InvoiceTotals,
}

async fn list_invoices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InvoiceParams>,
) -> Result<Json<InvoiceList>, AppError> {
    let status = match params.estado.as_deref() {
        None | Some("") | Some("todas") => None,
        Some(raw) => Some(
            InvoiceStatus::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown estado: {raw}")))?,
        ),
    };

    let facturas = filter_invoices(&state.invoices, status, params.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(InvoiceList {
        facturas,
        totales: totals(&state.invoices),
    }))
}
