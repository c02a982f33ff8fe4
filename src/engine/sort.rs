use std::cmp::Ordering;

use crate::models::load::Load;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    PriceDesc,
    PricePerKmDesc,
    DistanceAsc,
    WeightDesc,
    IdDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceDesc => "precio",
            SortKey::PricePerKmDesc => "precioKm",
            SortKey::DistanceAsc => "distancia",
            SortKey::WeightDesc => "peso",
            SortKey::IdDesc => "reciente",
        }
    }

    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "" | "precio" => Some(SortKey::PriceDesc),
            "precioKm" => Some(SortKey::PricePerKmDesc),
            "distancia" => Some(SortKey::DistanceAsc),
            "peso" => Some(SortKey::WeightDesc),
            "reciente" => Some(SortKey::IdDesc),
            _ => None,
        }
    }

    pub fn compare(&self, a: &Load, b: &Load) -> Ordering {
        match self {
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
            SortKey::PricePerKmDesc => b.price_per_km().total_cmp(&a.price_per_km()),
            SortKey::DistanceAsc => a.distance_km.total_cmp(&b.distance_km),
            SortKey::WeightDesc => b.weight_tons.total_cmp(&a.weight_tons),
            SortKey::IdDesc => b.id.cmp(&a.id),
        }
    }
}

/// Stable: loads that compare equal keep their input order.
pub fn sort_loads(loads: &mut [Load], key: SortKey) {
    loads.sort_by(|a, b| key.compare(a, b));
}
