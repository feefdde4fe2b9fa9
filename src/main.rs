use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use concierge::application::ports::{ConversationRepository, CreditLedger};
use concierge::application::services::{ChatService, ContextBuilder};
use concierge::infrastructure::llm::GeminiClient;
use concierge::infrastructure::observability::{TracingConfig, init_tracing};
use concierge::infrastructure::persistence::{
    PgConversationRepository, PgCreditLedger, create_pool,
};
use concierge::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    let tracing_config = TracingConfig {
        environment: settings.environment.to_string(),
        json_format: std::env::var("LOG_FORMAT")
            .map(|v| v.to_lowercase() == "json")
            .unwrap_or(settings.environment == Environment::Prod),
    };
    init_tracing(tracing_config, settings.server.port);

    let pool = create_pool(&settings.database.url, settings.database.max_connections).await?;
    sqlx::migrate!().run(&pool).await?;

    let conversation_repository: Arc<dyn ConversationRepository> =
        Arc::new(PgConversationRepository::new(pool.clone()));
    let credit_ledger: Arc<dyn CreditLedger> = Arc::new(PgCreditLedger::new(
        pool.clone(),
        settings.chat.default_credits,
    ));
    let gateway = Arc::new(GeminiClient::new(&settings.gemini));

    let chat_service = Arc::new(ChatService::new(
        Arc::clone(&conversation_repository),
        Arc::clone(&credit_ledger),
        Arc::clone(&gateway),
        ContextBuilder::new(
            settings.chat.persona.clone(),
            settings.chat.context_window,
        ),
        settings.chat.conversation_title.clone(),
        settings.chat.fallback_reply.clone(),
    ));

    let state = AppState {
        chat_service,
        conversation_repository,
        credit_ledger,
    };

    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
