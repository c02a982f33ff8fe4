use uuid::Uuid;

use crate::engine::sort::{SortKey, sort_loads};
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::models::load::{Load, LoadKind};

const DEFAULT_REPLY: &str =
    "Puedo ayudarte a encontrar cargas. Prueba preguntando por una ciudad o tipo de carga.";
const HELP_REPLY: &str = "¡Hola! Puedes preguntarme sobre cargas por ciudad (Madrid, Barcelona, Valencia, Sevilla, Bilbao) o tipo (urgente, frigorífico). También puedo darte un resumen del día o buscar las rutas más rentables.";

pub const SUGGESTED_ACTIONS: [&str; 2] = ["Ver mapa", "Filtrar cargas"];

/// What a message was understood to ask for. First match wins, in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MadridBarcelona,
    City(&'static str),
    Kind(LoadKind),
    BestPaid,
    Summary,
    Greeting,
    Unknown,
}

impl Intent {
    pub fn detect(message: &str) -> Intent {
        let lower = message.to_lowercase();
        let has = |needle: &str| lower.contains(needle);

        if has("madrid") || has("barcelona") {
            Intent::MadridBarcelona
        } else if has("valencia") {
            Intent::City("valencia")
        } else if has("urgente") {
            Intent::Kind(LoadKind::Urgent)
        } else if has("frigorifico") || has("refriger") {
            Intent::Kind(LoadKind::Refrigerated)
        } else if has("sevilla") {
            Intent::City("sevilla")
        } else if has("bilbao") {
            Intent::City("bilbao")
        } else if has("mejor") || has("rentable") || has("precio") {
            Intent::BestPaid
        } else if has("resumen") {
            Intent::Summary
        } else if has("hola") || has("ayuda") {
            Intent::Greeting
        } else {
            Intent::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intent::MadridBarcelona | Intent::City(_) => "city",
            Intent::Kind(_) => "kind",
            Intent::BestPaid => "best_paid",
            Intent::Summary => "summary",
            Intent::Greeting => "greeting",
            Intent::Unknown => "unknown",
        }
    }
}

fn capitalize(city: &str) -> String {
    let mut chars = city.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keyword-matching assistant used by `POST /api/chat` and as the client's
/// offline fallback.
pub fn reply(message: &str, loads: &[Load], shipments_in_progress: usize) -> (String, Vec<Load>) {
    match Intent::detect(message) {
        Intent::MadridBarcelona => {
            let found: Vec<Load> = loads
                .iter()
                .filter(|l| l.touches_city("madrid") || l.touches_city("barcelona"))
                .cloned()
                .collect();
            let text = format!(
                "He encontrado {} cargas relacionadas con Madrid/Barcelona:",
                found.len()
            );
            (text, found)
        }
        Intent::City(city) => {
            let found: Vec<Load> = loads.iter().filter(|l| l.touches_city(city)).cloned().collect();
            let text = format!(
                "He encontrado {} cargas relacionadas con {}:",
                found.len(),
                capitalize(city)
            );
            (text, found)
        }
        Intent::Kind(kind) => {
            let found: Vec<Load> = loads.iter().filter(|l| l.kind == kind).cloned().collect();
            let text = match kind {
                LoadKind::Refrigerated => {
                    format!("Hay {} cargas frigoríficas disponibles:", found.len())
                }
                _ => format!("Hay {} cargas urgentes disponibles:", found.len()),
            };
            (text, found)
        }
        Intent::BestPaid => {
            let mut found = loads.to_vec();
            sort_loads(&mut found, SortKey::PricePerKmDesc);
            ("Las cargas mejor pagadas por kilómetro:".to_string(), found)
        }
        Intent::Summary => {
            let text = format!(
                "Resumen del día: {} cargas disponibles, {} envíos en curso. Las rutas más activas son Madrid-Barcelona y Valencia-Sevilla.",
                loads.len(),
                shipments_in_progress
            );
            (text, Vec::new())
        }
        Intent::Greeting => (HELP_REPLY.to_string(), Vec::new()),
        Intent::Unknown => (DEFAULT_REPLY.to_string(), Vec::new()),
    }
}

pub fn respond(request: &ChatRequest, loads: &[Load], shipments_in_progress: usize) -> ChatResponse {
    let session_id = request
        .session_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (response, cargas_encontradas) = reply(&request.message, loads, shipments_in_progress);

    ChatResponse {
        response,
        cargas_encontradas,
        suggested_actions: SUGGESTED_ACTIONS.iter().map(|s| s.to_string()).collect(),
        session_id,
    }
}
