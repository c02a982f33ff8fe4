use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::load::Load;

/// Completion recorded for a shipment the moment its load is accepted.
pub const INITIAL_PROGRESS: u8 = 5;

/// Carrier name recorded when the accepting user gives none.
pub const DEFAULT_CARRIER: &str = "Carlos Lopez";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShipmentStatus {
    #[serde(rename = "recogida_pendiente")]
    PendingPickup,
    #[serde(rename = "en_transito")]
    InTransit,
    #[serde(rename = "entregado")]
    Delivered,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::PendingPickup => "recogida_pendiente",
            ShipmentStatus::InTransit => "en_transito",
            ShipmentStatus::Delivered => "entregado",
        }
    }

    pub fn parse(s: &str) -> Option<ShipmentStatus> {
        match s {
            "recogida_pendiente" => Some(ShipmentStatus::PendingPickup),
            "en_transito" => Some(ShipmentStatus::InTransit),
            "entregado" => Some(ShipmentStatus::Delivered),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shipment {
    pub id: String,
    #[serde(rename = "origen")]
    pub origin: String,
    #[serde(rename = "destino")]
    pub destination: String,
    #[serde(rename = "peso")]
    pub weight_tons: f64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "estado")]
    pub status: ShipmentStatus,
    #[serde(rename = "progreso")]
    pub progress: u8,
    #[serde(rename = "transportista", default)]
    pub carrier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Shipment {
    pub fn from_accepted(id: String, load: &Load, carrier: impl Into<String>) -> Self {
        Self {
            id,
            origin: load.origin.clone(),
            destination: load.destination.clone(),
            weight_tons: load.weight_tons,
            price: load.price,
            status: ShipmentStatus::PendingPickup,
            progress: INITIAL_PROGRESS,
            carrier: carrier.into(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != ShipmentStatus::Delivered
    }
}

/// Listing filter used by the shipments page and `GET /api/envios`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentFilter {
    All,
    Active,
    Completed,
    Status(ShipmentStatus),
}

impl ShipmentFilter {
    pub fn parse(s: &str) -> Option<ShipmentFilter> {
        match s {
            "" | "todos" => Some(ShipmentFilter::All),
            "activos" => Some(ShipmentFilter::Active),
            "completados" => Some(ShipmentFilter::Completed),
            other => ShipmentStatus::parse(other).map(ShipmentFilter::Status),
        }
    }

    pub fn matches(&self, shipment: &Shipment) -> bool {
        match self {
            ShipmentFilter::All => true,
            ShipmentFilter::Active => shipment.is_active(),
            ShipmentFilter::Completed => !shipment.is_active(),
            ShipmentFilter::Status(status) => shipment.status == *status,
        }
    }
}
