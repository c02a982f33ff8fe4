use serde::{Deserialize, Serialize};

use crate::models::load::Load;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub cargas_encontradas: Vec<Load>,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
    pub session_id: String,
}
