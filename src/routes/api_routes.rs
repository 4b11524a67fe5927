use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{MessageView, SendMessageRequest, TranslationRequest};
use crate::service::EnrichmentService;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/messages` — the send intent; annotation resolves asynchronously.
pub async fn send_message_handler(
    State(svc): State<EnrichmentService>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    match svc.send_message(request.text).await {
        Ok(message) => {
            (StatusCode::CREATED, Json(MessageView::from(&message))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// GET `/api/messages` — current snapshot in creation order.
pub async fn list_messages_handler(State(svc): State<EnrichmentService>) -> impl IntoResponse {
    let views: Vec<MessageView> =
        svc.snapshot().await.iter().map(MessageView::from).collect();
    Json(views)
}

/// POST `/api/messages/{id}/summary` — the requestSummary intent.
pub async fn request_summary_handler(
    Path(id): Path<Uuid>,
    State(svc): State<EnrichmentService>,
) -> Response {
    if let Err(e) = svc.request_summary(id).await {
        return error_response(&e);
    }
    current_view_response(&svc, id).await
}

/// POST `/api/messages/{id}/translation` — the requestTranslation intent.
pub async fn request_translation_handler(
    Path(id): Path<Uuid>,
    State(svc): State<EnrichmentService>,
    Json(request): Json<TranslationRequest>,
) -> Response {
    if let Err(e) = svc.request_translation(id, request.target_language).await {
        return error_response(&e);
    }
    current_view_response(&svc, id).await
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// 202 with the message as it stands now; the accepted annotation arrives
/// later via the event socket.
async fn current_view_response(svc: &EnrichmentService, id: Uuid) -> Response {
    match svc.get_message(id).await {
        Ok(message) => {
            (StatusCode::ACCEPTED, Json(MessageView::from(&message))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_unavailable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}
