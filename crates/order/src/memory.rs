use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::AccountId;
use tokio::sync::RwLock;

use crate::{
    Order, OrderError, OrderStore, Result,
    store::{OrderRow, group_order_rows},
};

#[derive(Debug, Clone)]
struct HeaderRow {
    id: String,
    created_at: DateTime<Utc>,
    account_id: String,
    total_price: i64,
}

#[derive(Debug, Clone)]
struct ItemRow {
    order_id: String,
    product_id: String,
    position: usize,
    name: String,
    description: String,
    price: i64,
    quantity: u32,
}

#[derive(Default)]
struct State {
    accounts: HashSet<String>,
    products: HashSet<String>,
    headers: Vec<HeaderRow>,
    items: Vec<ItemRow>,
}

/// In-memory order store for testing.
///
/// Storage is row-shaped like the PostgreSQL schema, and reads go through
/// the same join-row grouping. The referential integrity the schema
/// enforces is simulated with explicit account/product id sets; seed them
/// with [`insert_account`](Self::insert_account) and
/// [`insert_product`](Self::insert_product).
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account id as existing.
    pub async fn insert_account(&self, id: impl Into<String>) {
        self.state.write().await.accounts.insert(id.into());
    }

    /// Registers a product id as existing.
    pub async fn insert_product(&self, id: impl Into<String>) {
        self.state.write().await.products.insert(id.into());
    }

    /// Returns the number of persisted order headers.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.headers.len()
    }

    /// Returns the number of persisted line-item rows.
    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put_order(&self, order: &Order) -> Result<()> {
        let mut state = self.state.write().await;

        // All checks happen before any row is written, so a failed put
        // leaves both tables untouched.
        if state.headers.iter().any(|h| h.id == order.id.as_str()) {
            return Err(OrderError::AlreadyExists(order.id.clone()));
        }
        if !state.accounts.contains(order.account_id.as_str()) {
            return Err(OrderError::AccountNotFound(order.account_id.clone()));
        }
        if order
            .items
            .iter()
            .any(|item| !state.products.contains(item.product_id.as_str()))
        {
            return Err(OrderError::ProductNotFound);
        }

        state.headers.push(HeaderRow {
            id: order.id.as_str().to_string(),
            created_at: order.created_at,
            account_id: order.account_id.as_str().to_string(),
            total_price: order.total_price.cents(),
        });
        for (position, item) in order.items.iter().enumerate() {
            state.items.push(ItemRow {
                order_id: order.id.as_str().to_string(),
                product_id: item.product_id.as_str().to_string(),
                position,
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price.cents(),
                quantity: item.quantity,
            });
        }

        Ok(())
    }

    async fn orders_for_account(&self, account_id: &AccountId) -> Result<Vec<Order>> {
        let state = self.state.read().await;

        let mut headers: Vec<&HeaderRow> = state
            .headers
            .iter()
            .filter(|h| h.account_id == account_id.as_str())
            .collect();
        headers.sort_by(|a, b| a.id.cmp(&b.id));

        let mut rows = Vec::new();
        for header in headers {
            let mut items: Vec<&ItemRow> = state
                .items
                .iter()
                .filter(|i| i.order_id == header.id)
                .collect();
            items.sort_by_key(|i| i.position);

            for item in items {
                rows.push(OrderRow {
                    order_id: header.id.clone(),
                    created_at: header.created_at,
                    account_id: header.account_id.clone(),
                    total_price: header.total_price,
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    price: item.price,
                    quantity: item.quantity,
                });
            }
        }

        Ok(group_order_rows(rows))
    }
}
