use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{CategoryResponseDto, CategoryTreeDto, CreateCategoryDto};
use crate::features::categories::models::Category;
use crate::features::categories::services::{build_tree, OrphanPolicy};
use crate::features::menu::models::MenuItem;
use crate::features::menu::services::MenuItemService;

/// Service for category reads and the assembled tree
pub struct CategoryService {
    pool: PgPool,
    menu_items: Arc<MenuItemService>,
    orphan_policy: OrphanPolicy,
}

impl CategoryService {
    pub fn new(
        pool: PgPool,
        menu_items: Arc<MenuItemService>,
        orphan_policy: OrphanPolicy,
    ) -> Self {
        Self {
            pool,
            menu_items,
            orphan_policy,
        }
    }

    /// Create a category. A positive `parentId` must reference an existing
    /// category; anything else is stored as a root.
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let parent_id = match dto.parent() {
            Some(parent) => Some(self.find(parent).await?.id),
            None => None,
        };

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, parent_id)
            VALUES ($1, $2)
            RETURNING id, name, parent_id
            "#,
        )
        .bind(&dto.name)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(category_id = category.id, "category created");

        Ok(category.into())
    }

    pub async fn find(&self, id: i64) -> Result<Category> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name, parent_id FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to find category: {:?}", e);
                    AppError::Database(e)
                })?;

        category.ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// All categories in id order; NULL parents come back as `None`.
    pub async fn list_all(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name, parent_id FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list categories: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Assemble the full category tree with menu items attached, built
    /// fresh on every call.
    pub async fn get_tree(&self) -> Result<Vec<CategoryTreeDto>> {
        let categories = self.list_all().await?;

        let mut items_by_category: HashMap<i64, Vec<MenuItem>> = HashMap::new();
        for category in &categories {
            let items = self.menu_items.find_by_category(category.id).await?;
            items_by_category.insert(category.id, items);
        }

        let tree = build_tree(&categories, items_by_category, self.orphan_policy)?;

        Ok(tree.into_iter().map(|node| node.into()).collect())
    }
}
