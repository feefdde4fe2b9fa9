mod chat;
mod conversations;
mod credits;
mod health;

pub use chat::{ChatRequest, ChatResponse, ErrorResponse, chat_handler};
pub use conversations::{
    ConversationResponse, MessageListResponse, MessageResponse, latest_conversation_handler,
    list_messages_handler,
};
pub use credits::{CreditsResponse, get_credits_handler};
pub use health::health_handler;
