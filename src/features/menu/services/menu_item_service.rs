use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::menu::dtos::{CreateMenuItemDto, MenuItemResponseDto, UpdateMenuItemDto};
use crate::features::menu::models::MenuItem;
use crate::features::menu::services::PricingLookup;

/// Service for menu item management and reads
pub struct MenuItemService {
    pool: PgPool,
}

impl MenuItemService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateMenuItemDto) -> Result<MenuItemResponseDto> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            INSERT INTO menuitem (name, category_id, price, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, category_id, name, price, description
            "#,
        )
        .bind(&dto.name)
        .bind(dto.category_id)
        .bind(dto.price)
        .bind(&dto.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                AppError::BadRequest(format!("Category {} does not exist", dto.category_id))
            } else {
                tracing::error!("Failed to create menu item: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!(menu_item_id = item.id, "menu item created");

        Ok(item.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateMenuItemDto) -> Result<MenuItemResponseDto> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            UPDATE menuitem SET name = $1, price = $2, description = $3
            WHERE id = $4
            RETURNING id, category_id, name, price, description
            "#,
        )
        .bind(&dto.name)
        .bind(dto.price)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update menu item: {:?}", e);
            AppError::Database(e)
        })?;

        item.map(|m| m.into())
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM menuitem WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete menu item: {:?}", e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Menu item {} not found", id)));
        }

        Ok(())
    }

    /// All menu items attached to a category, used by the category tree
    pub async fn find_by_category(&self, category_id: i64) -> Result<Vec<MenuItem>> {
        sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, category_id, name, price, description
            FROM menuitem
            WHERE category_id = $1
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list menu items for category: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[async_trait]
impl PricingLookup for MenuItemService {
    async fn price(&self, menu_item_id: i64) -> Result<i64> {
        let price = sqlx::query_scalar::<_, i64>("SELECT price FROM menuitem WHERE id = $1")
            .bind(menu_item_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to look up menu item price: {:?}", e);
                AppError::Database(e)
            })?;

        price.ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", menu_item_id)))
    }
}
