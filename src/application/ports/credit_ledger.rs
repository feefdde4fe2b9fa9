use crate::domain::{CreditAccount, UserId};
use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Current account state. The account is created with the default
    /// balance on first access, so this never reports a missing account.
    async fn account(&self, user_id: UserId) -> Result<CreditAccount, RepositoryError>;

    /// Spends one credit and returns the new balance. The decrement must be
    /// an atomic conditional update: concurrent debits observing the same
    /// positive balance must not drive it below zero.
    async fn debit(&self, user_id: UserId) -> Result<i64, CreditError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CreditError {
    #[error("insufficient credits")]
    Insufficient,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
