use sqlx::FromRow;

/// Database model for a category. `parent_id` is `None` for root
/// categories; the legacy `-1`/`0` wire sentinels only exist at the DTO
/// boundary.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}
