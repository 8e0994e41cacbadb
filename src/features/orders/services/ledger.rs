use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::orders::models::{Order, OrderItem};

/// Row-level order/line-item storage, one statement per call. No business
/// logic lives here; ordering and compensation are the workflow's job.
#[async_trait]
pub trait OrderLedger: Send + Sync {
    async fn create_order(
        &self,
        user_id: i64,
        total_amount: i64,
        created_at: DateTime<Utc>,
    ) -> Result<i64>;

    async fn delete_order(&self, order_id: i64) -> Result<()>;

    async fn create_order_item(
        &self,
        order_id: i64,
        menu_item_id: i64,
        quantity: i32,
    ) -> Result<i64>;

    async fn delete_order_items_for_order(&self, order_id: i64) -> Result<()>;

    async fn list_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>>;

    async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>>;
}

/// Postgres-backed ledger
pub struct PgOrderLedger {
    pool: PgPool,
}

impl PgOrderLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderLedger for PgOrderLedger {
    async fn create_order(
        &self,
        user_id: i64,
        total_amount: i64,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO orders (user_id, created_at, total_amount) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(created_at)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create order: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete_order(&self, order_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete order: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Order {} not found", order_id)));
        }

        Ok(())
    }

    async fn create_order_item(
        &self,
        order_id: i64,
        menu_item_id: i64,
        quantity: i32,
    ) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO orderitem (order_id, menu_item_id, quantity) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(order_id)
        .bind(menu_item_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create order item: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete_order_items_for_order(&self, order_id: i64) -> Result<()> {
        // Zero rows is fine: an order that lost its items to an earlier
        // half-finished cancellation is still cancellable.
        sqlx::query("DELETE FROM orderitem WHERE order_id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete order items: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }

    async fn list_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>> {
        // Newest first, for deterministic responses. The contract itself
        // promises no particular order.
        sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, created_at, total_amount
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list orders: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
        sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, menu_item_id, quantity
            FROM orderitem
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list order items: {:?}", e);
            AppError::Database(e)
        })
    }
}
