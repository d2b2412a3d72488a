//! Backend boundaries consumed by the aggregator.
//!
//! Every boundary call returns [`BackendError`] on failure, which carries a
//! structured [`ErrorKind`]. Callers decide behavior by matching on the
//! kind, never by inspecting the message text.

use account::Account;
use async_trait::async_trait;
use catalog::Product;
use common::{AccountId, Money, ProductId};
use order::{LineItem, Order};
use thiserror::Error;

use crate::error::{ErrorKind, GatewayError};

/// Error returned by every backend boundary call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    pub kind: ErrorKind,
    pub message: String,
}

impl BackendError {
    /// Creates a backend error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns true if the backend reported the entity as absent.
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<BackendError> for GatewayError {
    fn from(err: BackendError) -> Self {
        GatewayError::new(err.kind, err.message)
    }
}

/// The account directory consumed by the gateway.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn create_account(&self, name: &str) -> Result<Account, BackendError>;

    async fn account_by_id(&self, id: &AccountId) -> Result<Account, BackendError>;

    async fn list_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>, BackendError>;
}

/// The product catalog consumed by the gateway.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn create_product(
        &self,
        name: &str,
        description: &str,
        price: Money,
    ) -> Result<Product, BackendError>;

    async fn product_by_id(&self, id: &ProductId) -> Result<Product, BackendError>;

    /// Batch lookup, bounded to 100 ids; unknown ids are silently omitted.
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, BackendError>;

    async fn list_products(&self, skip: u64, take: u64) -> Result<Vec<Product>, BackendError>;

    async fn search_products(
        &self,
        query: &str,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, BackendError>;
}

/// The order service consumed by the gateway.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    async fn post_order(
        &self,
        account_id: AccountId,
        items: Vec<LineItem>,
    ) -> Result<Order, BackendError>;

    async fn orders_for_account(&self, account_id: &AccountId)
    -> Result<Vec<Order>, BackendError>;
}
