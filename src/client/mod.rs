//! HTTP client for the dashboard. Every list fetch degrades to fixed demo
//! data; nothing here surfaces a fetch failure to the caller except chat.

pub mod dashboard;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::config::ClientConfig;
use crate::demo;
use crate::models::carrier::Carrier;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::models::load::Load;
use crate::models::shipment::Shipment;
use crate::models::stats::MarketStats;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.api_url, Duration::from_millis(config.timeout_ms))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json::<Value>().await?)
    }

    /// Lists come back either bare or wrapped as `{ "<key>": [...] }`.
    async fn get_list(&self, path: &str, key: &str) -> Result<Vec<Value>, ClientError> {
        let body = self.get_json(path).await?;
        let list = match body {
            Value::Object(mut wrapper) => wrapper.remove(key).unwrap_or(Value::Null),
            other => other,
        };
        Ok(serde_json::from_value(list)?)
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> Result<Vec<T>, ClientError> {
        self.get_list(path, key)
            .await?
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(ClientError::from))
            .collect()
    }

    pub async fn fetch_stats(&self) -> MarketStats {
        let fetched = async {
            let body = self.get_json("/api/stats").await?;
            Ok::<_, ClientError>(serde_json::from_value::<MarketStats>(body)?)
        }
        .await;

        fetched.unwrap_or_else(|err| {
            warn!(error = %err, "stats fetch failed, using fallback metrics");
            MarketStats::default()
        })
    }

    /// Records that fail validation are dropped one by one; a transport or
    /// payload failure replaces the whole list with the demo loads.
    pub async fn fetch_loads(&self) -> Vec<Load> {
        let items = match self.get_list("/api/cargas", "cargas").await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "cargas fetch failed, using demo data");
                return demo::fallback_loads();
            }
        };

        items
            .into_iter()
            .filter_map(|item| {
                let load = match serde_json::from_value::<Load>(item) {
                    Ok(load) => load,
                    Err(err) => {
                        warn!(error = %err, "dropping undecodable carga");
                        return None;
                    }
                };
                match load.validate() {
                    Ok(()) => Some(load),
                    Err(err) => {
                        warn!(error = %err, "dropping invalid carga");
                        None
                    }
                }
            })
            .collect()
    }

    pub async fn fetch_shipments(&self) -> Vec<Shipment> {
        self.get_records("/api/envios", "envios")
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "envios fetch failed, using demo data");
                demo::fallback_shipments()
            })
    }

    pub async fn fetch_carriers(&self) -> Vec<Carrier> {
        self.get_records("/api/transportistas", "transportistas")
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "transportistas fetch failed, using demo data");
                demo::fallback_carriers()
            })
    }

    pub async fn send_chat(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatResponse, ClientError> {
        let request = ChatRequest {
            message: message.to_string(),
            session_id: session_id.map(str::to_string),
        };

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json::<ChatResponse>().await?)
    }
}
