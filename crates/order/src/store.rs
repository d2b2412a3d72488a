use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{AccountId, Money, OrderId};

use crate::{LineItem, Order, Result};

/// Persistence boundary for orders.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists an order and all of its line items atomically.
    ///
    /// Either the whole aggregate commits or nothing does; no reader may
    /// observe a header without its items.
    async fn put_order(&self, order: &Order) -> Result<()>;

    /// Returns all orders for an account, sorted by order id ascending.
    ///
    /// An account with no orders yields an empty list, never an error.
    async fn orders_for_account(&self, account_id: &AccountId) -> Result<Vec<Order>>;
}

/// One row of the order-header/line-item join.
#[derive(Debug, Clone)]
pub(crate) struct OrderRow {
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: i64,
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub quantity: u32,
}

/// Groups flat join rows into order aggregates.
///
/// The first row seen for an order id starts the aggregate; subsequent
/// rows for the same id append a line item, preserving row order. The
/// result is sorted by order id so output is deterministic even if the
/// rows arrive unsorted.
pub(crate) fn group_order_rows(rows: Vec<OrderRow>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let item = LineItem {
            product_id: row.product_id.into(),
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price),
            quantity: row.quantity,
        };

        match index.get(&row.order_id) {
            Some(&at) => orders[at].items.push(item),
            None => {
                index.insert(row.order_id.clone(), orders.len());
                orders.push(Order {
                    id: OrderId::new(row.order_id),
                    created_at: row.created_at,
                    account_id: AccountId::new(row.account_id),
                    total_price: Money::from_cents(row.total_price),
                    items: vec![item],
                });
            }
        }
    }

    orders.sort_by(|a, b| a.id.cmp(&b.id));
    orders
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_id: &str, product_id: &str, price: i64, quantity: u32) -> OrderRow {
        OrderRow {
            order_id: order_id.to_string(),
            created_at: Utc::now(),
            account_id: "acc_1".to_string(),
            total_price: 0,
            product_id: product_id.to_string(),
            name: String::new(),
            description: String::new(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_grouping_splits_rows_by_order_id() {
        let rows = vec![
            row("o1", "p1", 100, 1),
            row("o1", "p2", 200, 2),
            row("o2", "p1", 100, 3),
        ];

        let orders = group_order_rows(rows);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "o1");
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].items[0].product_id.as_str(), "p1");
        assert_eq!(orders[0].items[1].product_id.as_str(), "p2");
        assert_eq!(orders[1].id.as_str(), "o2");
        assert_eq!(orders[1].items.len(), 1);
    }

    #[test]
    fn test_grouping_sorts_output_by_order_id() {
        // Interleaved and unsorted input still yields a deterministic list.
        let rows = vec![
            row("o2", "p1", 100, 1),
            row("o1", "p1", 100, 1),
            row("o2", "p2", 200, 1),
        ];

        let orders = group_order_rows(rows);

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id.as_str(), "o1");
        assert_eq!(orders[1].id.as_str(), "o2");
        assert_eq!(orders[1].items.len(), 2);
    }

    #[test]
    fn test_grouping_empty_input() {
        assert!(group_order_rows(Vec::new()).is_empty());
    }
}
