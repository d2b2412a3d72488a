use common::AccountId;

use crate::{Account, AccountError, AccountStore, Result};

/// Largest page a single listing call will return.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Service for managing accounts.
pub struct AccountService<S: AccountStore> {
    store: S,
}

impl<S: AccountStore> AccountService<S> {
    /// Creates a new account service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a new account with a generated id.
    #[tracing::instrument(skip(self))]
    pub async fn post_account(&self, name: &str) -> Result<Account> {
        if name.is_empty() {
            return Err(AccountError::NameRequired);
        }

        let account = Account::new(name);
        self.store.put_account(&account).await?;
        Ok(account)
    }

    /// Fetches an account by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_account(&self, id: &AccountId) -> Result<Account> {
        if id.is_empty() {
            return Err(AccountError::IdRequired);
        }
        self.store.account_by_id(id).await
    }

    /// Lists accounts ordered by id.
    ///
    /// `take` is capped at [`MAX_PAGE_SIZE`]; `skip == 0 && take == 0` means
    /// the first full page.
    #[tracing::instrument(skip(self))]
    pub async fn get_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>> {
        let take = if take > MAX_PAGE_SIZE || (skip == 0 && take == 0) {
            MAX_PAGE_SIZE
        } else {
            take
        };
        self.store.list_accounts(skip, take).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryAccountStore;

    #[tokio::test]
    async fn test_post_and_get_account() {
        let service = AccountService::new(InMemoryAccountStore::new());

        let created = service.post_account("Alice").await.unwrap();
        assert!(!created.id.is_empty());

        let fetched = service.get_account(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_post_account_requires_name() {
        let service = AccountService::new(InMemoryAccountStore::new());

        let result = service.post_account("").await;
        assert!(matches!(result, Err(AccountError::NameRequired)));
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let service = AccountService::new(InMemoryAccountStore::new());

        let result = service.get_account(&AccountId::new("missing")).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_accounts_pagination() {
        let service = AccountService::new(InMemoryAccountStore::new());
        for i in 0..5 {
            service.post_account(&format!("account-{i}")).await.unwrap();
        }

        let page = service.get_accounts(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);

        // skip=0, take=0 resolves to the first full page
        let all = service.get_accounts(0, 0).await.unwrap();
        assert_eq!(all.len(), 5);

        let over = service.get_accounts(0, 500).await.unwrap();
        assert_eq!(over.len(), 5);
    }
}
