use common::AccountId;
use serde::{Deserialize, Serialize};

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

impl Account {
    /// Creates an account with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AccountId::generate(),
            name: name.into(),
        }
    }
}
