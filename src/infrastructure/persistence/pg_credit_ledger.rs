use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use crate::application::ports::{CreditError, CreditLedger, RepositoryError};
use crate::domain::{CreditAccount, UserId};

pub struct PgCreditLedger {
    pool: PgPool,
    default_credits: i64,
}

impl PgCreditLedger {
    pub fn new(pool: PgPool, default_credits: i64) -> Self {
        Self {
            pool,
            default_credits,
        }
    }

    /// Creates the account with the default balance if it does not exist yet.
    /// Safe under concurrent first access: the insert is a no-op on conflict.
    async fn ensure_account(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO credit_accounts (user_id, credits_remaining)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(self.default_credits)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl CreditLedger for PgCreditLedger {
    #[instrument(skip(self), fields(user_id = %user_id.as_uuid()))]
    async fn account(&self, user_id: UserId) -> Result<CreditAccount, RepositoryError> {
        self.ensure_account(user_id).await?;

        let row = sqlx::query(
            r#"
            SELECT credits_remaining
            FROM credit_accounts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(CreditAccount {
            user_id,
            credits_remaining: row.get::<i64, _>("credits_remaining"),
        })
    }

    /// Single-statement conditional decrement. Two debits racing on a
    /// balance of 1 cannot both succeed: the WHERE clause admits only one.
    #[instrument(skip(self), fields(user_id = %user_id.as_uuid()))]
    async fn debit(&self, user_id: UserId) -> Result<i64, CreditError> {
        self.ensure_account(user_id).await?;

        let row = sqlx::query(
            r#"
            UPDATE credit_accounts
            SET credits_remaining = credits_remaining - 1
            WHERE user_id = $1 AND credits_remaining > 0
            RETURNING credits_remaining
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CreditError::Repository(RepositoryError::QueryFailed(e.to_string())))?;

        match row {
            Some(r) => Ok(r.get::<i64, _>("credits_remaining")),
            None => Err(CreditError::Insufficient),
        }
    }
}
