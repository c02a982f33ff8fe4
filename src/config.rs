use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub grpc_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub notification_history: usize,
    pub seed_demo_data: bool,
    pub cors_origins: Vec<String>,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            grpc_port: parse_or_default("GRPC_PORT", 50051)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            notification_history: parse_or_default("NOTIFICATION_HISTORY", 50)?,
            seed_demo_data: parse_or_default("SEED_DEMO_DATA", true)?,
            cors_origins: list_or_default("CORS_ORIGINS", "*"),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }
}

/// Settings the dashboard client reads at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout_ms: u64,
    pub mapbox_token: String,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            api_url: env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            timeout_ms: parse_or_default("API_TIMEOUT_MS", 5000)?,
            mapbox_token: env::var("MAPBOX_TOKEN").unwrap_or_default(),
        })
    }
}

pub(crate) fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

fn list_or_default(key: &str, default: &str) -> Vec<String> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
