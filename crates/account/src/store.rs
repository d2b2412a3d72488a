use async_trait::async_trait;
use common::AccountId;

use crate::{Account, Result};

/// Persistence boundary for the account directory.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account.
    ///
    /// Fails with `AlreadyExists` if the id is taken.
    async fn put_account(&self, account: &Account) -> Result<()>;

    /// Fetches an account by id, failing with `NotFound` if absent.
    async fn account_by_id(&self, id: &AccountId) -> Result<Account>;

    /// Lists accounts ordered by id, applying skip/take.
    async fn list_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>>;
}
