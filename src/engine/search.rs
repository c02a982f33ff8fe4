use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::engine::browser::{PAGE_SIZE, apply, page};
use crate::engine::filter::{FilterCriteria, KindFilter};
use crate::engine::sort::SortKey;
use crate::error::AppError;
use crate::models::load::Load;
use crate::state::AppState;

/// Board query as it arrives over the wire. Absent fields take the
/// dashboard defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub tipo: Option<String>,
    pub peso_min: Option<f64>,
    pub peso_max: Option<f64>,
    pub precio_km_min: Option<f64>,
    pub distancia_max: Option<f64>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub visible: Option<usize>,
}

impl SearchParams {
    pub fn resolve(&self) -> Result<(FilterCriteria, SortKey, usize), AppError> {
        let defaults = FilterCriteria::default();

        let kind = match self.tipo.as_deref() {
            Some(raw) => KindFilter::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown tipo: {raw}")))?,
            None => defaults.kind,
        };
        let sort = match self.sort.as_deref() {
            Some(raw) => SortKey::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unknown sort: {raw}")))?,
            None => SortKey::default(),
        };

        let criteria = FilterCriteria {
            kind,
            weight_range: (
                self.peso_min.unwrap_or(defaults.weight_range.0),
                self.peso_max.unwrap_or(defaults.weight_range.1),
            ),
            min_price_per_km: self.precio_km_min.unwrap_or(defaults.min_price_per_km),
            max_distance_km: self.distancia_max.unwrap_or(defaults.max_distance_km),
            search: self.q.clone().unwrap_or_default(),
        };

        Ok((criteria, sort, self.visible.unwrap_or(PAGE_SIZE)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    pub cargas: Vec<Load>,
    pub total: usize,
    pub visible: usize,
}

pub fn search_board(
    state: &AppState,
    params: &SearchParams,
    surface: &str,
) -> Result<SearchPage, AppError> {
    let start = Instant::now();
    let (criteria, sort, visible) = params.resolve()?;

    let filtered = apply(&state.loads.snapshot(), &criteria, sort);
    let cargas = page(&filtered, visible).to_vec();

    state
        .metrics
        .search_latency_seconds
        .with_label_values(&[surface])
        .observe(start.elapsed().as_secs_f64());

    Ok(SearchPage {
        visible: cargas.len(),
        total: filtered.len(),
        cargas,
    })
}
