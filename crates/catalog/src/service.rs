use common::{Money, ProductId};

use crate::{CatalogError, Product, ProductStore, Result};

/// Largest page a single listing or search call will return.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Largest id set a single batch lookup will accept.
pub const MAX_BATCH_SIZE: usize = 100;

fn page_bounds(skip: u64, take: u64) -> (u64, u64) {
    let take = if take > MAX_PAGE_SIZE || (skip == 0 && take == 0) {
        MAX_PAGE_SIZE
    } else {
        take
    };
    (skip, take)
}

/// Service for managing catalog products.
pub struct CatalogService<S: ProductStore> {
    store: S,
}

impl<S: ProductStore> CatalogService<S> {
    /// Creates a new catalog service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a new product with a generated id.
    #[tracing::instrument(skip(self))]
    pub async fn post_product(
        &self,
        name: &str,
        description: &str,
        price: Money,
    ) -> Result<Product> {
        if name.is_empty() {
            return Err(CatalogError::NameRequired);
        }
        if description.is_empty() {
            return Err(CatalogError::DescriptionRequired);
        }
        if price.is_negative() {
            return Err(CatalogError::NegativePrice);
        }

        let product = Product::new(name, description, price);
        self.store.put_product(&product).await?;
        Ok(product)
    }

    /// Fetches a product by id.
    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product> {
        if id.is_empty() {
            return Err(CatalogError::IdRequired);
        }
        self.store.product_by_id(id).await
    }

    /// Fetches the products whose ids appear in `ids`, up to
    /// [`MAX_BATCH_SIZE`] at once.
    ///
    /// Unknown ids are silently omitted; an empty id set yields an empty
    /// list without touching the store.
    #[tracing::instrument(skip(self, ids), fields(id_count = ids.len()))]
    pub async fn get_products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > MAX_BATCH_SIZE {
            return Err(CatalogError::TooManyIds {
                max: MAX_BATCH_SIZE,
            });
        }
        self.store.products_by_ids(ids).await
    }

    /// Lists products ordered by id.
    ///
    /// `take` is capped at [`MAX_PAGE_SIZE`]; `skip == 0 && take == 0` means
    /// the first full page.
    #[tracing::instrument(skip(self))]
    pub async fn get_products(&self, skip: u64, take: u64) -> Result<Vec<Product>> {
        let (skip, take) = page_bounds(skip, take);
        self.store.list_products(skip, take).await
    }

    /// Searches products by name or description, same paging rules as
    /// [`get_products`](Self::get_products).
    #[tracing::instrument(skip(self))]
    pub async fn search_products(&self, query: &str, skip: u64, take: u64) -> Result<Vec<Product>> {
        let (skip, take) = page_bounds(skip, take);
        self.store.search_products(query, skip, take).await
    }
}
