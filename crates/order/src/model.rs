use chrono::{DateTime, Utc};
use common::{AccountId, Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// Maximum number of line items in a single order.
pub const MAX_ORDER_ITEMS: usize = 100;

/// A product snapshot attached to one order at creation time.
///
/// Name, description and price are copied from the catalog when the order
/// is placed, so historical orders are unaffected by later catalog changes.
/// Invariant: `quantity > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub quantity: u32,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            description: description.into(),
            price,
            quantity,
        }
    }

    /// Returns the total price for this item (price × quantity).
    pub fn total_price(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

/// An order aggregate: header plus its line items.
///
/// `total_price` equals the sum of `price × quantity` over the items,
/// computed once at creation and never recomputed. Orders are immutable
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_at: DateTime<Utc>,
    pub account_id: AccountId,
    pub total_price: Money,
    pub items: Vec<LineItem>,
}
