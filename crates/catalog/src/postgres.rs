use async_trait::async_trait;
use common::{Money, ProductId};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{CatalogError, Product, ProductStore, Result};

/// PostgreSQL-backed product store.
///
/// Search uses simple `ILIKE` substring matching over name and description.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Creates a new PostgreSQL product store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::new(row.try_get::<String, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: Money::from_cents(row.try_get("price")?),
        })
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn put_product(&self, product: &Product) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, description, price) VALUES ($1, $2, $3, $4)")
            .bind(product.id.as_str())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price.cents())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("products_pkey")
                {
                    return CatalogError::AlreadyExists(product.id.clone());
                }
                CatalogError::Storage(e)
            })?;

        Ok(())
    }

    async fn product_by_id(&self, id: &ProductId) -> Result<Product> {
        let row = sqlx::query("SELECT id, name, description, price FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Self::row_to_product(row),
            None => Err(CatalogError::NotFound(id.clone())),
        }
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();

        let rows = sqlx::query(
            "SELECT id, name, description, price FROM products WHERE id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn list_products(&self, skip: u64, take: u64) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, description, price FROM products ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip as i64)
        .bind(take as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn search_products(&self, query: &str, skip: u64, take: u64) -> Result<Vec<Product>> {
        let pattern = format!("%{query}%");

        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price
            FROM products
            WHERE name ILIKE $1 OR description ILIKE $1
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(&pattern)
        .bind(skip as i64)
        .bind(take as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}
