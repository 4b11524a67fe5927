use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::models::WsEvent;
use crate::service::EnrichmentService;

/// GET `/ws/events` — upgrades to a WebSocket that pushes re-render events.
pub async fn ws_events_handler(
    ws: WebSocketUpgrade,
    State(svc): State<EnrichmentService>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, svc))
}

/// Handles a single presentation client.
///
/// Protocol: the server pushes `{ "type": "message_created" | "message_updated",
/// "message": {...} }` whenever the store changes; the client sends nothing
/// (text frames are ignored, a close frame ends the session). Intents travel
/// over the REST routes, not this socket.
async fn handle_socket(socket: WebSocket, svc: EnrichmentService) {
    info!("Presentation client connected");

    let mut events = svc.subscribe_events();
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if !send_event(&mut sender, &event).await {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // A slow client misses events; the next one it receives
                    // carries the current view, so it catches up on its own.
                    warn!("Presentation client lagged, skipped {skipped} events");
                }
                Err(RecvError::Closed) => break,
            },
            frame = receiver.next() => match frame {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("WebSocket receive error: {e}");
                    break;
                }
            },
        }
    }

    info!("Presentation client disconnected");
}

/// Serializes and sends one event; returns whether the socket is still usable.
async fn send_event(sender: &mut SplitSink<WebSocket, Message>, event: &WsEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => sender.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            warn!("Failed to serialize event: {e}");
            true
        }
    }
}
