//! Account directory service.
//!
//! Accounts are immutable once created: the service supports creating an
//! account, looking one up by id, and listing with pagination.

mod error;
mod memory;
mod model;
mod postgres;
mod service;
mod store;

pub use error::{AccountError, Result};
pub use memory::InMemoryAccountStore;
pub use model::Account;
pub use postgres::PgAccountStore;
pub use service::AccountService;
pub use store::AccountStore;
