use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::CompletionGateway;
use crate::domain::UserId;
use crate::presentation::state::AppState;

use super::chat::ErrorResponse;

#[derive(Serialize)]
pub struct CreditsResponse {
    pub credits_remaining: i64,
}

/// Remaining-credit display for the chat client. Reading the balance
/// creates the account with the default allowance on first access.
#[tracing::instrument(skip(state))]
pub async fn get_credits_handler<G>(
    State(state): State<AppState<G>>,
    Path(user_id): Path<Uuid>,
) -> impl IntoResponse
where
    G: CompletionGateway + 'static,
{
    match state
        .credit_ledger
        .account(UserId::from_uuid(user_id))
        .await
    {
        Ok(account) => (
            StatusCode::OK,
            Json(CreditsResponse {
                credits_remaining: account.credits_remaining,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read credit balance");
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
