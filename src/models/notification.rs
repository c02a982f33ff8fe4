use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Carga,
    Envio,
    Precio,
    Success,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Carga => "carga",
            NotificationKind::Envio => "envio",
            NotificationKind::Precio => "precio",
            NotificationKind::Success => "success",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    #[serde(rename = "tipo")]
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn load_accepted(origin: &str, destination: &str) -> Self {
        Self::new(
            NotificationKind::Success,
            format!("Carga aceptada: {origin} \u{2192} {destination}"),
        )
    }
}
