pub mod api_routes;
pub mod ws_routes;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::EnrichmentService;

/// Builds the presentation boundary: REST intents + snapshot, plus the
/// WebSocket that pushes re-render events.
pub fn create_router(service: EnrichmentService) -> Router {
    Router::new()
        .route(
            "/api/messages",
            post(api_routes::send_message_handler).get(api_routes::list_messages_handler),
        )
        .route("/api/messages/{id}/summary", post(api_routes::request_summary_handler))
        .route(
            "/api/messages/{id}/translation",
            post(api_routes::request_translation_handler),
        )
        .route("/ws/events", get(ws_routes::ws_events_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
