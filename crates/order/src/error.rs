use common::{AccountId, OrderId, ProductId};
use thiserror::Error;

/// Errors that can occur in the order service.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The account id was empty.
    #[error("account ID is required")]
    AccountIdRequired,

    /// The order contained no line items.
    #[error("at least one item is required")]
    NoItems,

    /// The order exceeded the line-item bound.
    #[error("cannot order more than {max} items at once")]
    TooManyItems { max: usize },

    /// A line item had an empty product id.
    #[error("product ID is required for item at index {index}")]
    ItemIdRequired { index: usize },

    /// A line item had a zero quantity.
    #[error("quantity must be greater than 0 for product {product_id}")]
    InvalidQuantity { product_id: ProductId },

    /// A line item had a negative price.
    #[error("price cannot be negative for product {product_id}")]
    NegativePrice { product_id: ProductId },

    /// The order referenced an account that does not exist.
    #[error("account with ID {0} does not exist")]
    AccountNotFound(AccountId),

    /// A line item referenced a product that does not exist.
    #[error("one or more products in the order could not be found")]
    ProductNotFound,

    /// An order with the given id already exists. Ids are generated, so
    /// this indicates a retry of an already-committed write.
    #[error("order with ID {0} already exists")]
    AlreadyExists(OrderId),

    /// A database error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result type for order service operations.
pub type Result<T> = std::result::Result<T, OrderError>;
