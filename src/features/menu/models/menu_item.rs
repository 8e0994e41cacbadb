use sqlx::FromRow;

/// Database model for a menu item. Price is in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
}
