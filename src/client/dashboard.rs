use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::{ApiClient, ClientError};
use crate::config::ClientConfig;
use crate::demo;
use crate::engine::browser::LoadBrowser;
use crate::engine::chat;
use crate::map::RouteOverlay;
use crate::map::directions::DirectionsClient;
use crate::models::carrier::Carrier;
use crate::models::load::{Coords, Load};
use crate::models::notification::Notification;
use crate::models::shipment::{DEFAULT_CARRIER, Shipment};
use crate::models::stats::MarketStats;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub cargas: Vec<Load>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Session-scoped dashboard state. This is the single owner of every slice;
/// views read from it and mutate only through its methods.
pub struct Dashboard {
    client: ApiClient,
    directions: DirectionsClient,
    carrier_name: String,
    pub stats: MarketStats,
    pub loads: Vec<Load>,
    pub shipments: Vec<Shipment>,
    pub carriers: Vec<Carrier>,
    pub notifications: Vec<Notification>,
    pub chat_log: Vec<ChatMessage>,
    pub browser: LoadBrowser,
    chat_session: Option<String>,
    selected: Option<String>,
}

impl Dashboard {
    pub fn new(client: ApiClient, directions: DirectionsClient) -> Self {
        Self {
            client,
            directions,
            carrier_name: DEFAULT_CARRIER.to_string(),
            stats: MarketStats::default(),
            loads: Vec::new(),
            shipments: Vec::new(),
            carriers: Vec::new(),
            notifications: demo::notifications(),
            chat_log: Vec::new(),
            browser: LoadBrowser::default(),
            chat_session: None,
            selected: None,
        }
    }

    /// Backend at `API_URL`, road geometry from Mapbox with `MAPBOX_TOKEN`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(
            ApiClient::from_config(config)?,
            DirectionsClient::from_config(config)?,
        ))
    }

    pub fn with_carrier_name(mut self, name: impl Into<String>) -> Self {
        self.carrier_name = name.into();
        self
    }

    /// Fetches the four lists concurrently. Never fails: each list falls
    /// back independently.
    pub async fn load(&mut self) {
        let (stats, loads, shipments, carriers) = tokio::join!(
            self.client.fetch_stats(),
            self.client.fetch_loads(),
            self.client.fetch_shipments(),
            self.client.fetch_carriers(),
        );

        self.stats = stats;
        self.shipments = shipments;
        self.carriers = carriers;
        self.replace_loads(loads);
    }

    fn replace_loads(&mut self, loads: Vec<Load>) {
        self.loads = loads;
        self.browser.set_loads(self.loads.clone());
    }

    pub fn active_shipments(&self) -> usize {
        self.shipments.iter().filter(|s| s.is_active()).count()
    }

    /// Accepting an id that is no longer on the board does nothing.
    pub fn accept_load(&mut self, load_id: &str) -> Option<Shipment> {
        let Some(position) = self.loads.iter().position(|l| l.id == load_id) else {
            debug!(load_id, "accept ignored, carga not on the board");
            return None;
        };

        let load = self.loads.remove(position);
        self.browser.set_loads(self.loads.clone());

        let shipment = Shipment::from_accepted(
            format!("e-{}", Uuid::new_v4()),
            &load,
            self.carrier_name.clone(),
        );
        self.shipments.insert(0, shipment.clone());
        self.stats.record_acceptance();
        self.notifications
            .insert(0, Notification::load_accepted(&load.origin, &load.destination));

        if self.selected.as_deref() == Some(load_id) {
            self.selected = None;
        }

        Some(shipment)
    }

    pub fn select_load(&mut self, load_id: Option<&str>) {
        self.selected = load_id
            .filter(|id| self.loads.iter().any(|l| l.id == *id))
            .map(str::to_string);
    }

    pub fn selected_load(&self) -> Option<&Load> {
        let id = self.selected.as_deref()?;
        self.loads.iter().find(|l| l.id == id)
    }

    pub async fn selected_route(&self) -> Option<RouteOverlay> {
        let load = self.selected_load()?;
        let road: Option<Vec<Coords>> = self
            .directions
            .driving_route(load.origin_coords, load.destination_coords)
            .await;
        Some(RouteOverlay::for_load(load, road))
    }

    /// Asks the backend; if that fails, answers locally from the board.
    pub async fn send_chat(&mut self, message: &str) -> Option<&ChatMessage> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.chat_log.push(ChatMessage {
            role: ChatRole::User,
            content: message.to_string(),
            cargas: Vec::new(),
            actions: Vec::new(),
        });

        let sent = self
            .client
            .send_chat(message, self.chat_session.as_deref())
            .await;

        let reply = match sent {
            Ok(response) => {
                if self.chat_session.is_none() {
                    self.chat_session = Some(response.session_id);
                }
                ChatMessage {
                    role: ChatRole::Assistant,
                    content: response.response,
                    cargas: response.cargas_encontradas,
                    actions: response.suggested_actions,
                }
            }
            Err(err) => {
                warn!(error = %err, "chat api error, falling back to simulated replies");
                let board = if self.loads.is_empty() {
                    demo::fallback_loads()
                } else {
                    self.loads.clone()
                };
                let (content, cargas) = chat::reply(message, &board, self.shipments.len());
                ChatMessage {
                    role: ChatRole::Assistant,
                    content,
                    cargas,
                    actions: chat::SUGGESTED_ACTIONS.iter().map(|s| s.to_string()).collect(),
                }
            }
        };

        self.chat_log.push(reply);
        self.chat_log.last()
    }

    pub fn chat_session(&self) -> Option<&str> {
        self.chat_session.as_deref()
    }

    /// Convenience for event loops: applies any settled debounced inputs.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.browser.tick(now)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{ChatRole, Dashboard};
    use crate::client::ApiClient;
    use crate::config::ClientConfig;
    use crate::map::RouteSource;
    use crate::map::directions::DirectionsClient;
    use crate::models::notification::NotificationKind;
    use crate::models::shipment::ShipmentStatus;

    fn no_directions() -> DirectionsClient {
        DirectionsClient::new("http://127.0.0.1:9", "", Duration::from_millis(50)).unwrap()
    }

    async fn offline_dashboard() -> Dashboard {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let mut dashboard = Dashboard::new(client, no_directions());
        dashboard.load().await;
        dashboard
    }

    #[tokio::test]
    async fn offline_load_uses_demo_board() {
        let mut dashboard = offline_dashboard().await;
        assert_eq!(dashboard.loads.len(), 4);
        assert_eq!(dashboard.browser.total(), 4);
        assert_eq!(dashboard.stats.available_loads, 0);
    }

    #[tokio::test]
    async fn accept_updates_every_slice_once() {
        let mut dashboard = offline_dashboard().await;
        dashboard.select_load(Some("c2"));
        let shipments_before = dashboard.shipments.len();
        let notifications_before = dashboard.notifications.len();

        let shipment = dashboard.accept_load("c2").unwrap();

        assert_eq!(dashboard.loads.iter().filter(|l| l.id == "c2").count(), 0);
        assert_eq!(dashboard.loads.len(), 3);
        assert_eq!(dashboard.browser.total(), 3);
        assert_eq!(dashboard.shipments.len(), shipments_before + 1);
        assert_eq!(dashboard.shipments[0], shipment);
        assert_eq!(shipment.status, ShipmentStatus::PendingPickup);
        assert_eq!(shipment.progress, 5);
        assert_eq!(shipment.carrier, "Carlos Lopez");
        assert_eq!(dashboard.stats.available_loads, -1);
        assert_eq!(dashboard.stats.shipments_in_progress, 1);
        assert_eq!(dashboard.notifications.len(), notifications_before + 1);
        assert_eq!(dashboard.notifications[0].kind, NotificationKind::Success);
        assert!(dashboard.selected_load().is_none());
    }

    #[tokio::test]
    async fn accepting_twice_is_a_silent_no_op() {
        let mut dashboard = offline_dashboard().await;
        assert!(dashboard.accept_load("c1").is_some());

        let shipments = dashboard.shipments.len();
        let stats = dashboard.stats;
        assert!(dashboard.accept_load("c1").is_none());
        assert_eq!(dashboard.shipments.len(), shipments);
        assert_eq!(dashboard.stats, stats);
    }

    #[tokio::test]
    async fn chat_falls_back_to_simulator_offline() {
        let mut dashboard = offline_dashboard().await;
        assert!(dashboard.send_chat("   ").await.is_none());

        let reply = dashboard.send_chat("algo urgente").await.unwrap().clone();
        assert_eq!(reply.role, ChatRole::Assistant);
        assert_eq!(reply.content, "Hay 1 cargas urgentes disponibles:");
        assert_eq!(reply.cargas.len(), 1);
        assert_eq!(dashboard.chat_log.len(), 2);
        assert!(dashboard.chat_session().is_none());
    }

    #[tokio::test]
    async fn chat_adopts_backend_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Hola",
                "cargas_encontradas": [],
                "suggested_actions": ["Ver mapa"],
                "session_id": "sess-42"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri(), Duration::from_secs(2)).unwrap();
        let mut dashboard = Dashboard::new(client, no_directions());
        let reply = dashboard.send_chat("hola").await.unwrap().clone();

        assert_eq!(reply.content, "Hola");
        assert_eq!(dashboard.chat_session(), Some("sess-42"));
    }

    #[test]
    fn from_config_wires_api_url_and_mapbox_token() {
        let config = ClientConfig {
            api_url: "http://cargas.internal:8080/".to_string(),
            timeout_ms: 1000,
            mapbox_token: "pk.dashboard".to_string(),
        };

        let dashboard = Dashboard::from_config(&config).unwrap();
        assert_eq!(dashboard.client.base_url(), "http://cargas.internal:8080");
        assert!(dashboard.directions.has_token());
    }

    #[tokio::test]
    async fn selected_route_without_token_is_a_straight_line() {
        let mut dashboard = offline_dashboard().await;
        assert!(dashboard.selected_route().await.is_none());

        dashboard.select_load(Some("c1"));
        let route = dashboard.selected_route().await.unwrap();
        assert_eq!(route.load_id, "c1");
        assert_eq!(route.source, RouteSource::StraightLine);
    }

    #[tokio::test]
    async fn selected_route_follows_road_geometry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/directions/v5/mapbox/driving/.+"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "routes": [
                    { "geometry": { "coordinates": [[-3.7038, 40.4168], [-0.8773, 41.6488], [2.1734, 41.3851]] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        let directions =
            DirectionsClient::new(server.uri(), "pk.test", Duration::from_secs(2)).unwrap();
        let mut dashboard = Dashboard::new(client, directions);
        dashboard.load().await;
        dashboard.select_load(Some("c1"));

        let route = dashboard.selected_route().await.unwrap();
        assert_eq!(route.source, RouteSource::Directions);
        assert_eq!(route.coordinates.len(), 3);
    }
}
