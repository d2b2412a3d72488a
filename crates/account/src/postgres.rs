use async_trait::async_trait;
use common::AccountId;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Account, AccountError, AccountStore, Result};

/// PostgreSQL-backed account store.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Creates a new PostgreSQL account store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: PgRow) -> Result<Account> {
        Ok(Account {
            id: AccountId::new(row.try_get::<String, _>("id")?),
            name: row.try_get("name")?,
        })
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn put_account(&self, account: &Account) -> Result<()> {
        sqlx::query("INSERT INTO accounts (id, name) VALUES ($1, $2)")
            .bind(account.id.as_str())
            .bind(&account.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("accounts_pkey")
                {
                    return AccountError::AlreadyExists(account.id.clone());
                }
                AccountError::Storage(e)
            })?;

        Ok(())
    }

    async fn account_by_id(&self, id: &AccountId) -> Result<Account> {
        let row = sqlx::query("SELECT id, name FROM accounts WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Self::row_to_account(row),
            None => Err(AccountError::NotFound(id.clone())),
        }
    }

    async fn list_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>> {
        let rows = sqlx::query("SELECT id, name FROM accounts ORDER BY id OFFSET $1 LIMIT $2")
            .bind(skip as i64)
            .bind(take as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_account).collect()
    }
}
