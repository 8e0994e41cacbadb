use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::menu::models::MenuItem;

/// Request DTO for creating a menu item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    pub category_id: i64,

    /// Price in the smallest currency unit
    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    #[serde(default)]
    pub description: String,
}

/// Request DTO for updating a menu item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(range(min = 0, message = "Price must not be negative"))]
    pub price: i64,

    #[serde(default)]
    pub description: String,
}

/// Response DTO for a menu item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponseDto {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub description: String,
}

impl From<MenuItem> for MenuItemResponseDto {
    fn from(m: MenuItem) -> Self {
        Self {
            id: m.id,
            category_id: m.category_id,
            name: m.name,
            price: m.price,
            description: m.description,
        }
    }
}
