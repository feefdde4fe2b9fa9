mod completion_gateway;
mod conversation_repository;
mod credit_ledger;
mod repository_error;

pub use completion_gateway::{CompletionError, CompletionGateway};
pub use conversation_repository::ConversationRepository;
pub use credit_ledger::{CreditError, CreditLedger};
pub use repository_error::RepositoryError;
