//! Fixed demo data: the server seeds its store with the full sets, the
//! dashboard client substitutes the short fallback sets when a fetch fails.

use chrono::NaiveDate;

use crate::models::carrier::{Carrier, CarrierStatus};
use crate::models::invoice::{Invoice, InvoiceStatus};
use crate::models::load::{Coords, Load, LoadKind};
use crate::models::notification::{Notification, NotificationKind};
use crate::models::shipment::{Shipment, ShipmentStatus};

const FALLBACK_LOADS: usize = 4;
const FALLBACK_SHIPMENTS: usize = 2;
const FALLBACK_CARRIERS: usize = 2;

const MADRID: Coords = Coords(-3.7038, 40.4168);
const BARCELONA: Coords = Coords(2.1734, 41.3851);
const VALENCIA: Coords = Coords(-0.3763, 39.4699);
const SEVILLA: Coords = Coords(-5.9845, 37.3891);
const BILBAO: Coords = Coords(-2.9253, 43.2630);
const ZARAGOZA: Coords = Coords(-0.8773, 41.6488);
const MALAGA: Coords = Coords(-4.4214, 36.7213);
const A_CORUNA: Coords = Coords(-8.3959, 43.3623);
const MURCIA: Coords = Coords(-1.1307, 37.9922);
const VALLADOLID: Coords = Coords(-4.7245, 41.6523);

#[allow(clippy::too_many_arguments)]
fn load(
    id: &str,
    (origin, origin_coords): (&str, Coords),
    (destination, destination_coords): (&str, Coords),
    weight_tons: f64,
    distance_km: f64,
    price: f64,
    kind: LoadKind,
    description: &str,
) -> Load {
    Load {
        id: id.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        origin_coords,
        destination_coords,
        weight_tons,
        distance_km,
        price,
        kind,
        description: description.to_string(),
    }
}

#[rustfmt::skip]
pub fn loads() -> Vec<Load> {
    use LoadKind::*;

    vec![
        load("c1", ("Madrid", MADRID), ("Barcelona", BARCELONA), 18.0, 621.0, 1250.0, Standard, "Carga paletizada - 33 palets europeos"),
        load("c2", ("Valencia", VALENCIA), ("Sevilla", SEVILLA), 12.0, 654.0, 980.0, Partial, "Mercancía textil en cajas"),
        load("c3", ("Bilbao", BILBAO), ("Madrid", MADRID), 24.0, 395.0, 890.0, Urgent, "Piezas industriales - Entrega antes de 24h"),
        load("c4", ("Zaragoza", ZARAGOZA), ("Valencia", VALENCIA), 8.0, 302.0, 620.0, Refrigerated, "Productos refrigerados a 4°C"),
        load("c5", ("Barcelona", BARCELONA), ("Málaga", MALAGA), 20.0, 997.0, 1850.0, Standard, "Mobiliario de oficina"),
        load("c6", ("Sevilla", SEVILLA), ("Bilbao", BILBAO), 15.0, 933.0, 1600.0, Urgent, "Material sanitario urgente"),
        load("c7", ("Madrid", MADRID), ("Valencia", VALENCIA), 6.0, 352.0, 480.0, Partial, "Electrónica de consumo"),
        load("c8", ("A Coruña", A_CORUNA), ("Madrid", MADRID), 22.0, 603.0, 1100.0, Standard, "Conservas y alimentación seca"),
        load("c9", ("Murcia", MURCIA), ("Barcelona", BARCELONA), 10.0, 580.0, 750.0, Refrigerated, "Frutas y verduras frescas"),
        load("c10", ("Valladolid", VALLADOLID), ("Sevilla", SEVILLA), 16.0, 534.0, 920.0, Standard, "Materiales de construcción"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn shipment(
    id: &str,
    origin: &str,
    destination: &str,
    weight_tons: f64,
    price: f64,
    status: ShipmentStatus,
    progress: u8,
    carrier: &str,
) -> Shipment {
    Shipment {
        id: id.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        weight_tons,
        price,
        status,
        progress,
        carrier: carrier.to_string(),
        created_at: None,
    }
}

#[rustfmt::skip]
pub fn shipments() -> Vec<Shipment> {
    use ShipmentStatus::*;

    vec![
        shipment("e1", "Madrid", "Barcelona", 18.0, 1250.0, InTransit, 65, "Miguel Fernández"),
        shipment("e2", "Valencia", "Bilbao", 14.0, 1100.0, InTransit, 30, "Ana García"),
        shipment("e3", "Sevilla", "Madrid", 20.0, 980.0, PendingPickup, 10, "Pedro Ruiz"),
        shipment("e4", "Barcelona", "Valencia", 8.0, 520.0, InTransit, 85, "Laura Martín"),
        shipment("e5", "Zaragoza", "Madrid", 12.0, 680.0, Delivered, 100, "Carlos Torres"),
        shipment("e6", "Málaga", "Barcelona", 25.0, 1800.0, Delivered, 100, "Roberto Sánchez"),
        shipment("e7", "Bilbao", "Sevilla", 16.0, 1450.0, InTransit, 45, "María López"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn carrier(
    id: &str,
    name: &str,
    email: &str,
    vehicle: &str,
    capacity_tons: f64,
    rating: f64,
    completed_shipments: u32,
    status: CarrierStatus,
) -> Carrier {
    Carrier {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        vehicle: vehicle.to_string(),
        capacity_tons,
        rating,
        completed_shipments,
        status,
    }
}

#[rustfmt::skip]
pub fn carriers() -> Vec<Carrier> {
    use CarrierStatus::*;

    vec![
        carrier("t1", "Miguel Fernández", "miguel@transporte.es", "Tráiler 40t", 24.0, 4.8, 234, OnRoute),
        carrier("t2", "Ana García", "ana@logistica.com", "Camión rígido 12t", 12.0, 4.9, 187, OnRoute),
        carrier("t3", "Pedro Ruiz", "pedro@envios.es", "Frigorífico 18t", 18.0, 4.7, 312, Available),
        carrier("t4", "Laura Martín", "laura@carga.com", "Furgoneta 3.5t", 3.0, 4.6, 98, Available),
        carrier("t5", "Carlos Torres", "carlos@rutas.es", "Tráiler 40t", 24.0, 4.5, 456, Unavailable),
        carrier("t6", "Roberto Sánchez", "roberto@trans.com", "Camión lona 18t", 18.0, 4.8, 278, Available),
        carrier("t7", "María López", "maria@express.es", "Tráiler 40t", 24.0, 4.9, 521, OnRoute),
        carrier("t8", "Javier Díaz", "javier@diaz.com", "Camión rígido 12t", 12.0, 4.4, 143, Available),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid demo date")
}

#[allow(clippy::too_many_arguments)]
fn invoice(
    id: &str,
    issued_on: NaiveDate,
    client: &str,
    origin: &str,
    destination: &str,
    amount: f64,
    status: InvoiceStatus,
    due_on: NaiveDate,
) -> Invoice {
    Invoice {
        id: id.to_string(),
        issued_on,
        client: client.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        amount,
        status,
        due_on,
    }
}

#[rustfmt::skip]
pub fn invoices() -> Vec<Invoice> {
    use InvoiceStatus::*;

    vec![
        invoice("F-2024-001", date(2024, 12, 15), "Transportes García S.L.", "Madrid", "Barcelona", 1250.0, Paid, date(2025, 1, 15)),
        invoice("F-2024-002", date(2024, 12, 18), "Logística Martínez", "Valencia", "Sevilla", 980.0, Pending, date(2025, 1, 18)),
        invoice("F-2024-003", date(2024, 12, 20), "Envios Rápidos Norte", "Bilbao", "Madrid", 890.0, Paid, date(2025, 1, 20)),
        invoice("F-2024-004", date(2024, 12, 22), "Frio Express S.A.", "Zaragoza", "Valencia", 620.0, Overdue, date(2025, 1, 5)),
        invoice("F-2024-005", date(2025, 1, 2), "Transportes García S.L.", "Barcelona", "Sevilla", 1450.0, Pending, date(2025, 2, 2)),
        invoice("F-2024-006", date(2025, 1, 5), "Cargas del Sur", "Málaga", "Madrid", 1100.0, Paid, date(2025, 2, 5)),
    ]
}

/// Notifications a fresh dashboard session starts with.
#[rustfmt::skip]
pub fn notifications() -> Vec<Notification> {
    vec![
        Notification::new(NotificationKind::Carga, "Nueva carga urgente: Madrid \u{2192} Barcelona"),
        Notification::new(NotificationKind::Envio, "Envío #4521 entregado exitosamente"),
        Notification::new(NotificationKind::Precio, "Precio actualizado: Valencia \u{2192} Sevilla +5%"),
        Notification::new(NotificationKind::Carga, "Carga frigorífica disponible: Murcia \u{2192} Barcelona"),
    ]
}

pub fn fallback_loads() -> Vec<Load> {
    loads().into_iter().take(FALLBACK_LOADS).collect()
}

pub fn fallback_shipments() -> Vec<Shipment> {
    shipments().into_iter().take(FALLBACK_SHIPMENTS).collect()
}

pub fn fallback_carriers() -> Vec<Carrier> {
    carriers().into_iter().take(FALLBACK_CARRIERS).collect()
}
