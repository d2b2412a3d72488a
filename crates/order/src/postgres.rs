use async_trait::async_trait;
use common::AccountId;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Order, OrderError, OrderStore, Result,
    store::{OrderRow, group_order_rows},
};

/// PostgreSQL-backed order store.
#[derive(Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_order_row(row: PgRow) -> Result<OrderRow> {
        Ok(OrderRow {
            order_id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            account_id: row.try_get("account_id")?,
            total_price: row.try_get("total_price")?,
            product_id: row.try_get("product_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            quantity: row.try_get::<i32, _>("quantity")? as u32,
        })
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn put_order(&self, order: &Order) -> Result<()> {
        // Header and line items commit or roll back as one unit. Dropping
        // the transaction before commit (error return, caller cancellation)
        // rolls it back.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, created_at, account_id, total_price) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id.as_str())
        .bind(order.created_at)
        .bind(order.account_id.as_str())
        .bind(order.total_price.cents())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                match db_err.constraint() {
                    Some("orders_account_id_fkey") => {
                        return OrderError::AccountNotFound(order.account_id.clone());
                    }
                    Some("orders_pkey") => {
                        return OrderError::AlreadyExists(order.id.clone());
                    }
                    _ => {}
                }
            }
            OrderError::Storage(e)
        })?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, position, name, description, price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(order.id.as_str())
            .bind(item.product_id.as_str())
            .bind(position as i32)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price.cents())
            .bind(item.quantity as i32)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.constraint() == Some("order_items_product_id_fkey")
                {
                    return OrderError::ProductNotFound;
                }
                OrderError::Storage(e)
            })?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn orders_for_account(&self, account_id: &AccountId) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT
                o.id, o.created_at, o.account_id, o.total_price,
                oi.product_id, oi.name, oi.description, oi.price, oi.quantity
            FROM orders o
            JOIN order_items oi ON o.id = oi.order_id
            WHERE o.account_id = $1
            ORDER BY o.id, oi.position
            "#,
        )
        .bind(account_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        let rows: Vec<OrderRow> = rows
            .into_iter()
            .map(Self::row_to_order_row)
            .collect::<Result<_>>()?;

        Ok(group_order_rows(rows))
    }
}
