use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::ProductId;
use tokio::sync::RwLock;

use crate::{CatalogError, Product, ProductStore, Result};

/// In-memory product store for testing.
///
/// Products are kept ordered by id, matching the PostgreSQL listing order.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<BTreeMap<String, Product>>>,
}

impl InMemoryProductStore {
    /// Creates a new empty in-memory product store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn put_product(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        if products.contains_key(product.id.as_str()) {
            return Err(CatalogError::AlreadyExists(product.id.clone()));
        }
        products.insert(product.id.as_str().to_string(), product.clone());
        Ok(())
    }

    async fn product_by_id(&self, id: &ProductId) -> Result<Product> {
        self.products
            .read()
            .await
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn list_products(&self, skip: u64, take: u64) -> Result<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .values()
            .skip(skip as usize)
            .take(take as usize)
            .cloned()
            .collect())
    }

    async fn search_products(&self, query: &str, skip: u64, take: u64) -> Result<Vec<Product>> {
        let query = query.to_lowercase();
        Ok(self
            .products
            .read()
            .await
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
            })
            .skip(skip as usize)
            .take(take as usize)
            .cloned()
            .collect())
    }
}
