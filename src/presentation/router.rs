use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::CompletionGateway;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, get_credits_handler, health_handler, latest_conversation_handler,
    list_messages_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<G>(state: AppState<G>) -> Router
where
    G: CompletionGateway + 'static,
{
    // Permissive on purpose: the chat widget is embedded in a public site
    // and the browser preflights every POST.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/chat", post(chat_handler::<G>))
        .route(
            "/api/v1/users/{user_id}/credits",
            get(get_credits_handler::<G>),
        )
        .route(
            "/api/v1/users/{user_id}/conversation",
            get(latest_conversation_handler::<G>),
        )
        .route(
            "/api/v1/conversations/{conversation_id}/messages",
            get(list_messages_handler::<G>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
