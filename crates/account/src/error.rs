use common::AccountId;
use thiserror::Error;

/// Errors that can occur in the account directory.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The account name was empty.
    #[error("account name is required")]
    NameRequired,

    /// The account id was empty.
    #[error("account ID is required")]
    IdRequired,

    /// No account exists with the given id.
    #[error("account not found: {0}")]
    NotFound(AccountId),

    /// An account with the given id already exists.
    #[error("account with ID {0} already exists")]
    AlreadyExists(AccountId),

    /// A database error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result type for account directory operations.
pub type Result<T> = std::result::Result<T, AccountError>;
