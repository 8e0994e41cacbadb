use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for an order. The total is derived at placement time and
/// the row is never updated in place.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub total_amount: i64,
}

/// Database model for one line item of an order
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
}
