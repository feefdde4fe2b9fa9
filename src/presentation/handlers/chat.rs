use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::CompletionGateway;
use crate::application::services::ChatError;
use crate::domain::{ConversationId, UserId};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn chat_handler<G>(
    State(state): State<AppState<G>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    G: CompletionGateway + 'static,
{
    tracing::debug!(message = %sanitize_prompt(&request.message), "Processing chat turn");

    if request.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No message provided");
    }

    let user_id = request
        .user_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .map(UserId::from_uuid);

    let conversation_id = match request.conversation_id.as_deref() {
        None | Some("") => None,
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(uuid) => Some(ConversationId::from_uuid(uuid)),
            Err(_) => {
                return error_response(StatusCode::BAD_REQUEST, "Conversation not found");
            }
        },
    };

    match state
        .chat_service
        .handle_turn(user_id, conversation_id, &request.message)
        .await
    {
        Ok(turn) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: turn.reply,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Chat turn failed");
            let (status, message) = map_chat_error(&e);
            error_response(status, message)
        }
    }
}

/// Error bodies carry only the machine-readable envelope; internal detail
/// stays in the logs.
fn map_chat_error(error: &ChatError) -> (StatusCode, &'static str) {
    match error {
        ChatError::Unauthenticated => (StatusCode::BAD_REQUEST, "User profile not found"),
        ChatError::InsufficientCredits => (StatusCode::PAYMENT_REQUIRED, "Insufficient credits"),
        ChatError::InvalidReference(_) => (StatusCode::BAD_REQUEST, "Conversation not found"),
        ChatError::Persistence(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        ChatError::UpstreamUnavailable(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "AI service unavailable")
        }
        ChatError::Configuration => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI service not configured",
        ),
    }
}

fn error_response(status: StatusCode, message: &str) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
