use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::client::ClientError;
use crate::config::ClientConfig;
use crate::models::load::Coords;

pub const MAPBOX_API: &str = "https://api.mapbox.com";

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<Coords>,
}

/// Road geometry lookup for the selected-route overlay.
#[derive(Debug, Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl DirectionsClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }

    /// Mapbox with the configured token and the API timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(
            MAPBOX_API,
            &config.mapbox_token,
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// `None` on any failure; callers draw a straight line instead.
    pub async fn driving_route(&self, origin: Coords, destination: Coords) -> Option<Vec<Coords>> {
        if self.access_token.is_empty() {
            return None;
        }

        let url = format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url,
            origin.lng(),
            origin.lat(),
            destination.lng(),
            destination.lat()
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("geometries", "geojson"),
                ("overview", "full"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()
            .await;

        let body = match response.and_then(|r| r.error_for_status()) {
            Ok(response) => response.json::<DirectionsResponse>().await,
            Err(err) => Err(err),
        };

        match body {
            Ok(parsed) => parsed
                .routes
                .into_iter()
                .next()
                .map(|route| route.geometry.coordinates),
            Err(err) => {
                warn!(error = %err, "directions lookup failed");
                None
            }
        }
    }
}
