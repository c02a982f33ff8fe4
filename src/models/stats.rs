use serde::{Deserialize, Serialize};

use crate::models::carrier::Carrier;
use crate::models::shipment::Shipment;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarketStats {
    #[serde(rename = "cargas_disponibles")]
    pub available_loads: i64,
    #[serde(rename = "envios_en_curso")]
    pub shipments_in_progress: i64,
    #[serde(rename = "completados_mes")]
    pub completed_this_month: i64,
    #[serde(rename = "transportistas_activos")]
    pub active_carriers: i64,
}

impl MarketStats {
    pub fn tally<'a>(
        available_loads: usize,
        shipments: impl IntoIterator<Item = &'a Shipment>,
        carriers: impl IntoIterator<Item = &'a Carrier>,
    ) -> Self {
        let (active, completed) =
            shipments
                .into_iter()
                .fold((0i64, 0i64), |(active, completed), shipment| {
                    if shipment.is_active() {
                        (active + 1, completed)
                    } else {
                        (active, completed + 1)
                    }
                });

        Self {
            available_loads: available_loads as i64,
            shipments_in_progress: active,
            completed_this_month: completed,
            active_carriers: carriers.into_iter().filter(|c| c.is_active()).count() as i64,
        }
    }

    pub fn record_acceptance(&mut self) {
        self.available_loads -= 1;
        self.shipments_in_progress += 1;
    }
}
