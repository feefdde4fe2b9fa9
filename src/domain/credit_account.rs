use super::UserId;

/// Per-user AI invocation quota. The balance never goes negative and is
/// only decremented by successful AI turns.
#[derive(Debug, Clone, Copy)]
pub struct CreditAccount {
    pub user_id: UserId,
    pub credits_remaining: i64,
}
