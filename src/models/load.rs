use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `[longitude, latitude]`, the order the map SDK and the JSON payloads use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn lng(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum LoadKind {
    #[serde(rename = "completa")]
    Standard,
    #[serde(rename = "parcial")]
    Partial,
    #[serde(rename = "frigorifico")]
    Refrigerated,
    #[serde(rename = "urgente")]
    Urgent,
}

impl LoadKind {
    pub const ALL: [LoadKind; 4] = [
        LoadKind::Standard,
        LoadKind::Partial,
        LoadKind::Refrigerated,
        LoadKind::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadKind::Standard => "completa",
            LoadKind::Partial => "parcial",
            LoadKind::Refrigerated => "frigorifico",
            LoadKind::Urgent => "urgente",
        }
    }

    pub fn parse(s: &str) -> Option<LoadKind> {
        LoadKind::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Marker color used by the map view.
    pub fn color(&self) -> &'static str {
        match self {
            LoadKind::Standard => "#10b981",
            LoadKind::Partial => "#eab308",
            LoadKind::Refrigerated => "#3b82f6",
            LoadKind::Urgent => "#f97316",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LoadError {
    #[error("load id cannot be empty")]
    MissingId,

    #[error("load {id}: {field} cannot be empty")]
    BlankField { id: String, field: &'static str },

    #[error("load {id}: {field} must be a positive number, got {value}")]
    NonPositive {
        id: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Load {
    pub id: String,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "origen_coords", default)]
    pub origin_coords: Coords,
    #[serde(rename = "destino_coords", default)]
    pub destination_coords: Coords,
    #[serde(rename = "peso")]
    pub weight_tons: f64,
    #[serde(rename = "distancia")]
    pub distance_km: f64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "tipo")]
    pub kind: LoadKind,
    #[serde(rename = "descripcion", default)]
    pub description: String,
}

impl Load {
    /// Only meaningful for validated loads; `distance_km` is guaranteed > 0 there.
    pub fn price_per_km(&self) -> f64 {
        self.price / self.distance_km
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.id.trim().is_empty() {
            return Err(LoadError::MissingId);
        }

        for (field, value) in [("origen", &self.origin), ("destino", &self.destination)] {
            if value.trim().is_empty() {
                return Err(LoadError::BlankField {
                    id: self.id.clone(),
                    field,
                });
            }
        }

        for (field, value) in [
            ("peso", self.weight_tons),
            ("distancia", self.distance_km),
            ("precio", self.price),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LoadError::NonPositive {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }

    pub fn touches_city(&self, needle_lower: &str) -> bool {
        self.origin.to_lowercase().contains(needle_lower)
            || self.destination.to_lowercase().contains(needle_lower)
    }
}
