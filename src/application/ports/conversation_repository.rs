use crate::domain::{Conversation, ConversationId, Message, UserId};
use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Most recently created conversation for the user, if any.
    async fn find_latest_conversation(
        &self,
        user_id: UserId,
    ) -> Result<Option<Conversation>, RepositoryError>;

    async fn create_conversation(&self, conversation: &Conversation)
    -> Result<(), RepositoryError>;

    /// Appends a turn. A dangling `conversation_id` yields
    /// `RepositoryError::ConstraintViolation`.
    async fn append_message(&self, message: &Message) -> Result<(), RepositoryError>;

    /// The most recent `limit` messages, returned in ascending creation
    /// order (ties broken by insertion order). Restartable: repeated calls
    /// with no intervening writes return the same sequence.
    async fn list_messages(
        &self,
        conversation_id: ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, RepositoryError>;
}
