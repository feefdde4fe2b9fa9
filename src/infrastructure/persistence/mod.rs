mod pg_conversation_repository;
mod pg_credit_ledger;
mod pg_pool;

pub use pg_conversation_repository::PgConversationRepository;
pub use pg_credit_ledger::PgCreditLedger;
pub use pg_pool::create_pool;
