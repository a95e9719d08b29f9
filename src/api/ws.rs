//! WebSocket Notice Stream
//!
//! Pushes hub notices to connected clients as JSON text frames. The
//! stream is one-way; inbound frames are only inspected for close.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::api::state::AppState;
use crate::events::NoticeHub;

/// GET /api/v1/ws
pub async fn notice_stream(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: Arc<NoticeHub>) {
    let (mut sender, mut receiver) = socket.split();
    let mut notices = hub.subscribe();

    let connection_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(connection_id = %connection_id, "notice stream connected");

    loop {
        tokio::select! {
            notice = notices.recv() => {
                match notice {
                    Ok(notice) => {
                        let text = match serde_json::to_string(&notice) {
                            Ok(text) => text,
                            Err(e) => {
                                tracing::error!(error = %e, "failed to serialize notice");
                                continue;
                            }
                        };
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    // dropped events are acceptable; catch up and continue
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(
                            connection_id = %connection_id,
                            skipped,
                            "notice stream lagged"
                        );
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            frame = receiver.next() => {
                match frame {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // ping/pong handled by axum; other frames ignored
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::info!(connection_id = %connection_id, "notice stream disconnected");
}
