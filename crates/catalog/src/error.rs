use common::ProductId;
use thiserror::Error;

/// Errors that can occur in the product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product name was empty.
    #[error("product name is required")]
    NameRequired,

    /// The product description was empty.
    #[error("product description is required")]
    DescriptionRequired,

    /// The product price was negative.
    #[error("product price cannot be negative")]
    NegativePrice,

    /// The product id was empty.
    #[error("product ID is required")]
    IdRequired,

    /// An id-set lookup exceeded the batch bound.
    #[error("cannot request more than {max} products at once")]
    TooManyIds { max: usize },

    /// No product exists with the given id.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// A product with the given id already exists.
    #[error("product with ID {0} already exists")]
    AlreadyExists(ProductId),

    /// A database error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
