use std::sync::Arc;

use crate::application::ports::{CompletionGateway, ConversationRepository, CreditLedger};
use crate::application::services::ChatService;

/// Per-process handles, built explicitly in `main` and injected into the
/// router. No ambient singletons: everything a handler touches comes
/// through here.
pub struct AppState<G>
where
    G: CompletionGateway,
{
    pub chat_service: Arc<ChatService<G>>,
    pub conversation_repository: Arc<dyn ConversationRepository>,
    pub credit_ledger: Arc<dyn CreditLedger>,
}

impl<G> Clone for AppState<G>
where
    G: CompletionGateway,
{
    fn clone(&self) -> Self {
        Self {
            chat_service: Arc::clone(&self.chat_service),
            conversation_repository: Arc::clone(&self.conversation_repository),
            credit_ledger: Arc::clone(&self.credit_ledger),
        }
    }
}
