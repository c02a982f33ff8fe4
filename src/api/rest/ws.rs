use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::models::notification::Notification;
use crate::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| stream_notifications(socket, state))
}

type Outbound = SplitSink<WebSocket, Message>;

/// Returns false once the peer is gone.
async fn push(sender: &mut Outbound, notification: &Notification) -> bool {
    match serde_json::to_string(notification) {
        Ok(json) => sender.send(Message::Text(json)).await.is_ok(),
        Err(err) => {
            warn!(error = %err, notification_id = %notification.id, "unserializable notification");
            true
        }
    }
}

async fn stream_notifications(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    // subscribe before reading the backlog so nothing published in between is lost
    let mut rx = state.notification_tx.subscribe();
    let backlog = state.recent_notifications();

    info!(backlog = backlog.len(), "notification subscriber connected");

    let feed = tokio::spawn(async move {
        for notification in backlog.iter().rev() {
            if !push(&mut sender, notification).await {
                return;
            }
        }

        loop {
            match rx.recv().await {
                Ok(notification) => {
                    if !push(&mut sender, &notification).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notification subscriber lagging");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let inbound = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(frame) = msg {
                debug!(?frame, "notification subscriber closed");
                break;
            }
        }
    });

    tokio::select! {
        _ = feed => {},
        _ = inbound => {},
    }

    info!("notification subscriber disconnected");
}
