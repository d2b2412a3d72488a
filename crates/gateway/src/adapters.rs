//! In-process adapters from the domain services onto the backend
//! boundaries.
//!
//! Each adapter is the single point where that service's typed errors are
//! translated into the closed [`ErrorKind`] taxonomy.

use account::{Account, AccountError, AccountService, AccountStore};
use async_trait::async_trait;
use catalog::{CatalogError, CatalogService, Product, ProductStore};
use common::{AccountId, Money, ProductId};
use order::{LineItem, Order, OrderError, OrderService, OrderStore};

use crate::boundary::{AccountDirectory, BackendError, OrderBackend, ProductCatalog};
use crate::error::ErrorKind;

fn account_error(err: AccountError) -> BackendError {
    let kind = match &err {
        AccountError::NameRequired | AccountError::IdRequired => ErrorKind::InvalidParameter,
        AccountError::NotFound(_) => ErrorKind::NotFound,
        AccountError::AlreadyExists(_) => ErrorKind::AlreadyExists,
        AccountError::Storage(_) => ErrorKind::Internal,
    };
    BackendError::new(kind, err.to_string())
}

fn catalog_error(err: CatalogError) -> BackendError {
    let kind = match &err {
        CatalogError::NameRequired
        | CatalogError::DescriptionRequired
        | CatalogError::NegativePrice
        | CatalogError::IdRequired
        | CatalogError::TooManyIds { .. } => ErrorKind::InvalidParameter,
        CatalogError::NotFound(_) => ErrorKind::NotFound,
        CatalogError::AlreadyExists(_) => ErrorKind::AlreadyExists,
        CatalogError::Storage(_) => ErrorKind::Internal,
    };
    BackendError::new(kind, err.to_string())
}

fn order_error(err: OrderError) -> BackendError {
    let kind = match &err {
        OrderError::AccountIdRequired
        | OrderError::NoItems
        | OrderError::TooManyItems { .. }
        | OrderError::ItemIdRequired { .. }
        | OrderError::InvalidQuantity { .. }
        | OrderError::NegativePrice { .. } => ErrorKind::InvalidParameter,
        OrderError::AccountNotFound(_) | OrderError::ProductNotFound => ErrorKind::NotFound,
        OrderError::AlreadyExists(_) => ErrorKind::AlreadyExists,
        OrderError::Storage(_) => ErrorKind::Internal,
    };
    BackendError::new(kind, err.to_string())
}

/// Adapter exposing an [`AccountService`] as an [`AccountDirectory`].
pub struct LocalAccountDirectory<S: AccountStore> {
    service: AccountService<S>,
}

impl<S: AccountStore> LocalAccountDirectory<S> {
    pub fn new(service: AccountService<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: AccountStore> AccountDirectory for LocalAccountDirectory<S> {
    async fn create_account(&self, name: &str) -> Result<Account, BackendError> {
        self.service.post_account(name).await.map_err(account_error)
    }

    async fn account_by_id(&self, id: &AccountId) -> Result<Account, BackendError> {
        self.service.get_account(id).await.map_err(account_error)
    }

    async fn list_accounts(&self, skip: u64, take: u64) -> Result<Vec<Account>, BackendError> {
        self.service
            .get_accounts(skip, take)
            .await
            .map_err(account_error)
    }
}

/// Adapter exposing a [`CatalogService`] as a [`ProductCatalog`].
pub struct LocalProductCatalog<S: ProductStore> {
    service: CatalogService<S>,
}

impl<S: ProductStore> LocalProductCatalog<S> {
    pub fn new(service: CatalogService<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: ProductStore> ProductCatalog for LocalProductCatalog<S> {
    async fn create_product(
        &self,
        name: &str,
        description: &str,
        price: Money,
    ) -> Result<Product, BackendError> {
        self.service
            .post_product(name, description, price)
            .await
            .map_err(catalog_error)
    }

    async fn product_by_id(&self, id: &ProductId) -> Result<Product, BackendError> {
        self.service.get_product(id).await.map_err(catalog_error)
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, BackendError> {
        self.service
            .get_products_by_ids(ids)
            .await
            .map_err(catalog_error)
    }

    async fn list_products(&self, skip: u64, take: u64) -> Result<Vec<Product>, BackendError> {
        self.service
            .get_products(skip, take)
            .await
            .map_err(catalog_error)
    }

    async fn search_products(
        &self,
        query: &str,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Product>, BackendError> {
        self.service
            .search_products(query, skip, take)
            .await
            .map_err(catalog_error)
    }
}

/// Adapter exposing an [`OrderService`] as an [`OrderBackend`].
pub struct LocalOrderBackend<S: OrderStore> {
    service: OrderService<S>,
}

impl<S: OrderStore> LocalOrderBackend<S> {
    pub fn new(service: OrderService<S>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: OrderStore> OrderBackend for LocalOrderBackend<S> {
    async fn post_order(
        &self,
        account_id: AccountId,
        items: Vec<LineItem>,
    ) -> Result<Order, BackendError> {
        self.service
            .post_order(account_id, items)
            .await
            .map_err(order_error)
    }

    async fn orders_for_account(
        &self,
        account_id: &AccountId,
    ) -> Result<Vec<Order>, BackendError> {
        self.service
            .orders_for_account(account_id)
            .await
            .map_err(order_error)
    }
}
