use async_trait::async_trait;
use common::ProductId;

use crate::{Product, Result};

/// Persistence boundary for the product catalog.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts a new product.
    ///
    /// Fails with `AlreadyExists` if the id is taken.
    async fn put_product(&self, product: &Product) -> Result<()>;

    /// Fetches a product by id, failing with `NotFound` if absent.
    async fn product_by_id(&self, id: &ProductId) -> Result<Product>;

    /// Fetches the products whose ids appear in `ids`.
    ///
    /// Unknown ids are silently omitted from the result.
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>>;

    /// Lists products ordered by id, applying skip/take.
    async fn list_products(&self, skip: u64, take: u64) -> Result<Vec<Product>>;

    /// Lists products whose name or description matches `query`,
    /// ordered by id, applying skip/take.
    async fn search_products(&self, query: &str, skip: u64, take: u64) -> Result<Vec<Product>>;
}
