mod chat_service;
mod context_builder;

pub use chat_service::{ChatError, ChatService, ChatTurn};
pub use context_builder::ContextBuilder;
