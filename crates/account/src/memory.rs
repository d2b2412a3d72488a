use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::AccountId;
use tokio::sync::RwLock;

use crate::{Account, AccountError, AccountStore, Result};

/// In-memory account store for testing.
///
/// Accounts are kept ordered by id, matching the PostgreSQL listing order.
#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<BTreeMap<String, Account>>>,
}

impl InMemoryAccountStore {
    /// Creates a new empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored accounts.
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn put_account(&self, account: &Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(account.id.as_str()) {
            return Err(AccountError::AlreadyExists(account.id.clone()));
        }
        accounts.insert(account.id.as_str().to_string(), account.clone());
        Ok(())
    }

    async fn account_by_id(&self, id: &AccountId) -> Result<Account> {
        self.accounts
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| AccountError::NotFound(id.clone()))
    }

    async fn list_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .skip(skip as usize)
            .take(take as usize)
            .cloned()
            .collect())
    }
}
