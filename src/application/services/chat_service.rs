use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{
    CompletionError, CompletionGateway, ConversationRepository, CreditError, CreditLedger,
    RepositoryError,
};
use crate::application::services::ContextBuilder;
use crate::domain::{Conversation, ConversationId, Message, MessageRole, UserId};

/// Orchestrates one chat turn: authorization, credit check, conversation resolution,
/// user-turn persistence, context assembly, the provider call, AI-turn
/// persistence, and the credit decrement — strictly in that order.
///
/// The decrement happens only after the AI turn is durably stored, so a
/// spent credit always has a matching AI message. A failed provider call
/// leaves the user turn in place and the balance untouched; the client is
/// expected to resend, which appends a duplicate user turn (accepted, not
/// deduplicated).
pub struct ChatService<G>
where
    G: CompletionGateway,
{
    conversations: Arc<dyn ConversationRepository>,
    ledger: Arc<dyn CreditLedger>,
    gateway: Arc<G>,
    context_builder: ContextBuilder,
    conversation_title: String,
    fallback_reply: String,
}

/// Outcome of a successful turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub conversation_id: ConversationId,
    pub reply: String,
    pub credits_remaining: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("user identity missing or malformed")]
    Unauthenticated,
    #[error("insufficient credits")]
    InsufficientCredits,
    #[error("unknown conversation: {0}")]
    InvalidReference(String),
    #[error("persistence failed: {0}")]
    Persistence(#[from] RepositoryError),
    #[error("completion provider unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("completion provider not configured")]
    Configuration,
}

impl<G> ChatService<G>
where
    G: CompletionGateway,
{
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        ledger: Arc<dyn CreditLedger>,
        gateway: Arc<G>,
        context_builder: ContextBuilder,
        conversation_title: String,
        fallback_reply: String,
    ) -> Self {
        Self {
            conversations,
            ledger,
            gateway,
            context_builder,
            conversation_title,
            fallback_reply,
        }
    }

    #[tracing::instrument(skip(self, message))]
    pub async fn handle_turn(
        &self,
        user_id: Option<UserId>,
        conversation_id: Option<ConversationId>,
        message: &str,
    ) -> Result<ChatTurn, ChatError> {
        // Authorization happens here, not at the HTTP boundary: a turn
        // without a resolved identity aborts before anything is read.
        let user_id = user_id.ok_or(ChatError::Unauthenticated)?;

        let account = self.ledger.account(user_id).await?;
        if account.credits_remaining <= 0 {
            info!("turn rejected: no credits remaining");
            return Err(ChatError::InsufficientCredits);
        }

        let conversation_id = match conversation_id {
            Some(id) => id,
            None => self.resolve_conversation(user_id).await?,
        };

        // History is snapshotted before the user turn is appended so the
        // new message never shows up twice in the prompt.
        let history = self
            .conversations
            .list_messages(conversation_id, self.context_builder.window())
            .await?;

        let user_turn = Message::new(conversation_id, MessageRole::User, message.to_string());
        self.conversations
            .append_message(&user_turn)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(detail) => ChatError::InvalidReference(detail),
                other => ChatError::Persistence(other),
            })?;

        let prompt = self.context_builder.build_prompt(&history, message);

        let reply = match self.gateway.complete(&prompt).await {
            Ok(text) => text,
            Err(CompletionError::Empty) => {
                // The provider answered but gave us nothing usable. The turn
                // still counts: the user consumed an AI invocation.
                warn!("empty completion, substituting fallback reply");
                self.fallback_reply.clone()
            }
            Err(CompletionError::Configuration) => return Err(ChatError::Configuration),
            Err(CompletionError::Unavailable(detail)) => {
                warn!(detail = %detail, "completion provider unavailable; user turn kept, credit untouched");
                return Err(ChatError::UpstreamUnavailable(detail));
            }
        };

        let ai_turn = Message::new(conversation_id, MessageRole::Assistant, reply.clone());
        self.conversations.append_message(&ai_turn).await?;

        let credits_remaining = self.ledger.debit(user_id).await.map_err(|e| match e {
            CreditError::Insufficient => ChatError::InsufficientCredits,
            CreditError::Repository(inner) => ChatError::Persistence(inner),
        })?;

        info!(
            conversation_id = %conversation_id.as_uuid(),
            credits_remaining,
            "chat turn completed"
        );

        Ok(ChatTurn {
            conversation_id,
            reply,
            credits_remaining,
        })
    }

    /// Find-or-create: one lookup for the user's most recent thread, and a
    /// new one is created only on a miss. Opening the chat window therefore
    /// never spawns a fresh conversation when one already exists.
    async fn resolve_conversation(&self, user_id: UserId) -> Result<ConversationId, ChatError> {
        if let Some(existing) = self.conversations.find_latest_conversation(user_id).await? {
            return Ok(existing.id);
        }

        let conversation = Conversation::new(user_id, Some(self.conversation_title.clone()));
        self.conversations.create_conversation(&conversation).await?;
        info!(conversation_id = %conversation.id.as_uuid(), "created conversation");
        Ok(conversation.id)
    }
}
