use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarrierStatus {
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "en_ruta")]
    OnRoute,
    #[serde(rename = "no_disponible")]
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Carrier {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "vehiculo", default)]
    pub vehicle: String,
    #[serde(rename = "capacidad", default)]
    pub capacity_tons: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "envios_completados", default)]
    pub completed_shipments: u32,
    #[serde(rename = "estado")]
    pub status: CarrierStatus,
}

impl Carrier {
    pub fn is_active(&self) -> bool {
        self.status != CarrierStatus::Unavailable
    }
}
