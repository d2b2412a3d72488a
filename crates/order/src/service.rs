use chrono::Utc;
use common::{AccountId, Money, OrderId};

use crate::{LineItem, MAX_ORDER_ITEMS, Order, OrderError, OrderStore, Result};

/// Service for creating and reading orders.
///
/// Pricing is authoritative here: the total is computed from the line
/// items as given. Enriching bare product ids with catalog attributes is
/// the gateway's responsibility, not this service's.
pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new order.
    ///
    /// Generates the order id (UUIDv7, so ids sort in creation order) and
    /// the UTC creation timestamp, computes the total over the items in
    /// order, and delegates to the store for the atomic write.
    #[tracing::instrument(skip(self, items), fields(account_id = %account_id, item_count = items.len()))]
    pub async fn post_order(&self, account_id: AccountId, items: Vec<LineItem>) -> Result<Order> {
        if account_id.is_empty() {
            return Err(OrderError::AccountIdRequired);
        }
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }
        if items.len() > MAX_ORDER_ITEMS {
            return Err(OrderError::TooManyItems {
                max: MAX_ORDER_ITEMS,
            });
        }
        for (index, item) in items.iter().enumerate() {
            if item.product_id.is_empty() {
                return Err(OrderError::ItemIdRequired { index });
            }
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: item.product_id.clone(),
                });
            }
            if item.price.is_negative() {
                return Err(OrderError::NegativePrice {
                    product_id: item.product_id.clone(),
                });
            }
        }

        let total_price: Money = items.iter().map(LineItem::total_price).sum();

        let order = Order {
            id: OrderId::generate(),
            created_at: Utc::now(),
            account_id,
            total_price,
            items,
        };

        self.store.put_order(&order).await?;

        tracing::info!(order_id = %order.id, total_price = %order.total_price, "order created");
        Ok(order)
    }

    /// Returns all orders for an account, sorted by order id.
    #[tracing::instrument(skip(self))]
    pub async fn orders_for_account(&self, account_id: &AccountId) -> Result<Vec<Order>> {
        if account_id.is_empty() {
            return Err(OrderError::AccountIdRequired);
        }
        self.store.orders_for_account(account_id).await
    }
}
