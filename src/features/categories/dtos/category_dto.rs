use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::features::categories::services::CategoryTreeNode;
use crate::features::menu::dtos::MenuItemResponseDto;
use crate::shared::constants::CATEGORY_NAME_MAX_LEN;

/// Wire sentinel for "no parent". Kept at the DTO boundary only; the model
/// and the tree builder use `Option<i64>`.
pub const ROOT_PARENT_ID: i64 = -1;

/// Request DTO for creating a category.
///
/// `parentId` absent or `<= 0` means a root category (the legacy clients
/// send `0` or omit the field).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(length(
        min = 1,
        max = CATEGORY_NAME_MAX_LEN,
        message = "Name must be 1-45 characters"
    ))]
    pub name: String,

    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl CreateCategoryDto {
    /// Normalize the wire-level parent value: only strictly positive ids
    /// count as a real parent reference.
    pub fn parent(&self) -> Option<i64> {
        self.parent_id.filter(|&p| p > 0)
    }
}

/// Response DTO for a category row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: i64,
    pub name: String,
    /// `-1` for root categories (wire convention)
    pub parent_id: i64,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            parent_id: c.parent_id.unwrap_or(ROOT_PARENT_ID),
        }
    }
}

/// Response DTO for the assembled category tree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeDto {
    pub id: i64,
    pub name: String,
    pub menu_items: Vec<MenuItemResponseDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryTreeDto>,
}

impl From<CategoryTreeNode> for CategoryTreeDto {
    fn from(node: CategoryTreeNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            menu_items: node.menu_items.into_iter().map(|m| m.into()).collect(),
            children: node.children.into_iter().map(|c| c.into()).collect(),
        }
    }
}
