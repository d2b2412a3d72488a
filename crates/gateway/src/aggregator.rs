//! Fan-out/aggregation resolver logic.
//!
//! One [`Aggregator`] is constructed at process start, owning all
//! collaborator handles, and is passed explicitly into every handler; it
//! holds no per-request state. Every outbound backend call carries its own
//! deadline, strictly shorter than the inbound request budget.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use account::Account;
use catalog::Product;
use common::{AccountId, Money, ProductId};
use order::{LineItem, Order};

use crate::boundary::{AccountDirectory, BackendError, OrderBackend, ProductCatalog};
use crate::error::{ErrorKind, GatewayError};

/// Largest page size after normalization.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Largest id set accepted by an id-set lookup.
pub const MAX_ID_SET: usize = 100;

/// Largest number of requested items in a create_order call.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Default per-call deadline for outbound backend calls.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(3);

/// Pagination input as received from clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageInput {
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

impl PageInput {
    /// Normalizes skip/take for the backends.
    ///
    /// Negative values are `InvalidParameter`; `take` above
    /// [`MAX_PAGE_SIZE`] clamps down to it; `skip == 0 && take == 0`
    /// (including absent values) means the first full page of
    /// [`MAX_PAGE_SIZE`]. A nonzero skip with `take == 0` stays an empty
    /// page.
    pub fn normalize(self) -> Result<(u64, u64), GatewayError> {
        let skip = self.skip.unwrap_or(0);
        let take = self.take.unwrap_or(0);

        if skip < 0 {
            return Err(GatewayError::invalid_parameter("skip cannot be negative"));
        }
        if take < 0 {
            return Err(GatewayError::invalid_parameter("take cannot be negative"));
        }

        let skip = skip as u64;
        let take = (take as u64).min(MAX_PAGE_SIZE);
        let take = if skip == 0 && take == 0 {
            MAX_PAGE_SIZE
        } else {
            take
        };

        Ok((skip, take))
    }
}

/// Dispatch selector for the products query.
///
/// The modes are mutually exclusive per call: an exact id wins over an id
/// set, which wins over search/listing.
#[derive(Debug, Clone, Default)]
pub struct ProductSelector {
    pub id: Option<ProductId>,
    pub ids: Option<Vec<ProductId>>,
    pub query: Option<String>,
    pub page: PageInput,
}

/// One requested line item of a create_order call: a bare product id and
/// quantity, before hydration.
#[derive(Debug, Clone)]
pub struct RequestedItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Resolves client-facing queries and mutations by fanning out to the
/// account, catalog, and order backends.
pub struct Aggregator {
    accounts: Arc<dyn AccountDirectory>,
    catalog: Arc<dyn ProductCatalog>,
    orders: Arc<dyn OrderBackend>,
    call_timeout: Duration,
}

impl Aggregator {
    /// Creates an aggregator over the three backend handles.
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        catalog: Arc<dyn ProductCatalog>,
        orders: Arc<dyn OrderBackend>,
    ) -> Self {
        Self {
            accounts,
            catalog,
            orders,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Overrides the per-call deadline.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Applies the per-call deadline to one outbound backend call.
    ///
    /// Expiry is a backend failure like any other and maps to `Internal`.
    async fn deadline<T>(
        &self,
        fut: impl Future<Output = Result<T, BackendError>>,
    ) -> Result<T, BackendError> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                metrics::counter!("gateway_backend_deadline_expirations_total").increment(1);
                Err(BackendError::new(
                    ErrorKind::Internal,
                    format!(
                        "backend call did not complete within {}ms",
                        self.call_timeout.as_millis()
                    ),
                ))
            }
        }
    }

    // -- Queries --

    /// Accounts query: exact-id lookup or paginated listing.
    ///
    /// An account the directory does not know resolves to an empty list,
    /// never an error.
    #[tracing::instrument(skip(self))]
    pub async fn accounts(
        &self,
        id: Option<AccountId>,
        page: PageInput,
    ) -> Result<Vec<Account>, GatewayError> {
        if let Some(id) = id {
            if id.is_empty() {
                return Err(GatewayError::invalid_parameter("id cannot be empty"));
            }
            return match self.deadline(self.accounts.account_by_id(&id)).await {
                Ok(account) => Ok(vec![account]),
                Err(e) if e.is_not_found() => Ok(Vec::new()),
                Err(e) => Err(e.into()),
            };
        }

        let (skip, take) = page.normalize()?;
        Ok(self.deadline(self.accounts.list_accounts(skip, take)).await?)
    }

    /// Products query: exact id, id set, or search/listing.
    ///
    /// Missing products are never an error: an exact-id miss is an empty
    /// list, and ids the catalog omits from a batch are simply absent.
    #[tracing::instrument(skip(self, selector))]
    pub async fn products(&self, selector: ProductSelector) -> Result<Vec<Product>, GatewayError> {
        let ProductSelector {
            id,
            ids,
            query,
            page,
        } = selector;

        if let Some(id) = id {
            if id.is_empty() {
                return Err(GatewayError::invalid_parameter("id cannot be empty"));
            }
            return match self.deadline(self.catalog.product_by_id(&id)).await {
                Ok(product) => Ok(vec![product]),
                Err(e) if e.is_not_found() => Ok(Vec::new()),
                Err(e) => Err(e.into()),
            };
        }

        if let Some(ids) = ids.filter(|ids| !ids.is_empty()) {
            if ids.len() > MAX_ID_SET {
                return Err(GatewayError::invalid_parameter(format!(
                    "cannot request more than {MAX_ID_SET} products at once"
                )));
            }
            return Ok(self.deadline(self.catalog.products_by_ids(&ids)).await?);
        }

        let (skip, take) = page.normalize()?;
        let result = match query.filter(|q| !q.is_empty()) {
            Some(query) => {
                self.deadline(self.catalog.search_products(&query, skip, take))
                    .await
            }
            None => self.deadline(self.catalog.list_products(skip, take)).await,
        };

        match result {
            Ok(products) => Ok(products),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Orders for one account (the nested account→orders field).
    ///
    /// An account with no orders, including one the order backend does not
    /// know, is an empty list, never an error.
    #[tracing::instrument(skip(self))]
    pub async fn account_orders(&self, account_id: &AccountId) -> Result<Vec<Order>, GatewayError> {
        if account_id.is_empty() {
            return Err(GatewayError::invalid_parameter("account ID is required"));
        }

        match self
            .deadline(self.orders.orders_for_account(account_id))
            .await
        {
            Ok(orders) => Ok(orders),
            Err(e) if e.is_not_found() => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Account detail with its orders embedded.
    ///
    /// Both reads are independent and side-effect-free, so they are issued
    /// concurrently. Failure domains: the account lookup failing fails the
    /// request; the orders field failing with NotFound degrades to an empty
    /// list, any other orders failure fails the request.
    #[tracing::instrument(skip(self))]
    pub async fn account_overview(
        &self,
        account_id: &AccountId,
    ) -> Result<(Account, Vec<Order>), GatewayError> {
        if account_id.is_empty() {
            return Err(GatewayError::invalid_parameter("account ID is required"));
        }

        let (account, orders) = tokio::join!(
            self.deadline(self.accounts.account_by_id(account_id)),
            self.deadline(self.orders.orders_for_account(account_id)),
        );

        let account = account.map_err(GatewayError::from)?;
        let orders = match orders {
            Ok(orders) => orders,
            Err(e) if e.is_not_found() => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok((account, orders))
    }

    // -- Mutations --

    /// Creates an account.
    #[tracing::instrument(skip(self))]
    pub async fn create_account(&self, name: &str) -> Result<Account, GatewayError> {
        if name.is_empty() {
            return Err(GatewayError::invalid_parameter("name is required"));
        }
        Ok(self.deadline(self.accounts.create_account(name)).await?)
    }

    /// Creates a catalog product.
    #[tracing::instrument(skip(self))]
    pub async fn create_product(
        &self,
        name: &str,
        description: &str,
        price: Money,
    ) -> Result<Product, GatewayError> {
        if name.is_empty() {
            return Err(GatewayError::invalid_parameter("name is required"));
        }
        if description.is_empty() {
            return Err(GatewayError::invalid_parameter("description is required"));
        }
        if price.is_negative() {
            return Err(GatewayError::invalid_parameter("price cannot be negative"));
        }
        Ok(self
            .deadline(self.catalog.create_product(name, description, price))
            .await?)
    }

    /// Creates an order: validate, hydrate, price, persist.
    ///
    /// Items with non-positive quantity are dropped, not rejected. Items
    /// the catalog does not return are still ordered, with empty
    /// name/description and zero price; only the id and quantity are
    /// recorded. A failure at any stage aborts the pipeline; no order row
    /// exists unless persistence committed.
    #[tracing::instrument(skip(self, requested), fields(account_id = %account_id, requested = requested.len()))]
    pub async fn create_order(
        &self,
        account_id: AccountId,
        requested: Vec<RequestedItem>,
    ) -> Result<Order, GatewayError> {
        if account_id.is_empty() {
            return Err(GatewayError::invalid_parameter("accountId is required"));
        }
        if requested.is_empty() {
            return Err(GatewayError::invalid_parameter(
                "order must contain at least one item",
            ));
        }
        if requested.len() > MAX_ORDER_ITEMS {
            return Err(GatewayError::invalid_parameter(format!(
                "order cannot contain more than {MAX_ORDER_ITEMS} items"
            )));
        }
        for (index, item) in requested.iter().enumerate() {
            if item.product_id.is_empty() {
                return Err(GatewayError::invalid_parameter(format!(
                    "product ID is required at index {index}"
                )));
            }
        }

        let mut surviving: Vec<(ProductId, u32)> = Vec::new();
        for item in requested {
            if item.quantity <= 0 {
                continue;
            }
            let quantity = u32::try_from(item.quantity).map_err(|_| {
                GatewayError::invalid_parameter(format!(
                    "quantity out of range for product {}",
                    item.product_id
                ))
            })?;
            surviving.push((item.product_id, quantity));
        }
        if surviving.is_empty() {
            return Err(GatewayError::invalid_parameter(
                "order must contain at least one item with quantity greater than 0",
            ));
        }

        let ids: Vec<ProductId> = surviving.iter().map(|(id, _)| id.clone()).collect();
        let found = self.deadline(self.catalog.products_by_ids(&ids)).await?;
        let by_id: HashMap<&str, &Product> = found.iter().map(|p| (p.id.as_str(), p)).collect();

        let items: Vec<LineItem> = surviving
            .into_iter()
            .map(|(product_id, quantity)| match by_id.get(product_id.as_str()) {
                Some(product) => LineItem {
                    product_id,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    price: product.price,
                    quantity,
                },
                None => LineItem {
                    product_id,
                    name: String::new(),
                    description: String::new(),
                    price: Money::zero(),
                    quantity,
                },
            })
            .collect();

        let order = self
            .deadline(self.orders.post_order(account_id, items))
            .await
            .inspect_err(|_| {
                metrics::counter!("gateway_order_failures_total").increment(1);
            })?;

        metrics::counter!("gateway_orders_created_total").increment(1);
        Ok(order)
    }
}
