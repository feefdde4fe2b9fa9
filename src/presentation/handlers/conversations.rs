use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::CompletionGateway;
use crate::domain::{Conversation, ConversationId, Message, UserId};
use crate::presentation::state::AppState;

use super::chat::ErrorResponse;

/// Upper bound on a history read; the chat window shows far fewer.
const MESSAGE_LIST_LIMIT: usize = 200;

#[derive(Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub content: String,
    pub is_ai: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<MessageResponse>,
}

impl From<Conversation> for ConversationResponse {
    fn from(c: Conversation) -> Self {
        Self {
            id: c.id.as_uuid(),
            title: c.title,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id.as_uuid(),
            conversation_id: m.conversation_id.as_uuid(),
            content: m.content,
            is_ai: m.role.is_ai(),
            created_at: m.created_at,
        }
    }
}

/// Resolves the user's most recent thread for the chat window. Creation is
/// left to the first chat turn, so this is a pure read.
#[tracing::instrument(skip(state))]
pub async fn latest_conversation_handler<G>(
    State(state): State<AppState<G>>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    G: CompletionGateway + 'static,
{
    match state
        .conversation_repository
        .find_latest_conversation(UserId::from_uuid(user_id))
        .await
    {
        Ok(Some(conversation)) => {
            (StatusCode::OK, Json(ConversationResponse::from(conversation))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "No conversation yet".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to resolve latest conversation");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_messages_handler<G>(
    State(state): State<AppState<G>>,
    Path(conversation_id): Path<Uuid>,
) -> impl IntoResponse
where
    G: CompletionGateway + 'static,
{
    match state
        .conversation_repository
        .list_messages(
            ConversationId::from_uuid(conversation_id),
            MESSAGE_LIST_LIMIT,
        )
        .await
    {
        Ok(messages) => (
            StatusCode::OK,
            Json(MessageListResponse {
                messages: messages.into_iter().map(MessageResponse::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list messages");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
