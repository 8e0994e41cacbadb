use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::menu::dtos::{CreateMenuItemDto, MenuItemResponseDto, UpdateMenuItemDto};
use crate::features::menu::services::MenuItemService;
use crate::shared::types::ApiResponse;

/// Create a menu item (admin only)
#[utoipa::path(
    post,
    path = "/admin/menu-item",
    request_body = CreateMenuItemDto,
    responses(
        (status = 201, description = "Menu item created", body = ApiResponse<MenuItemResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 403, description = "Requires admin role")
    ),
    security(("bearer_auth" = [])),
    tag = "menu"
)]
pub async fn create_menu_item(
    State(service): State<Arc<MenuItemService>>,
    AppJson(dto): AppJson<CreateMenuItemDto>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<MenuItemResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.create(dto).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::success(Some(item), None, None)),
    ))
}

/// Update a menu item (admin only)
#[utoipa::path(
    patch,
    path = "/admin/menu-item/{id}",
    params(
        ("id" = i64, Path, description = "Menu item ID")
    ),
    request_body = UpdateMenuItemDto,
    responses(
        (status = 200, description = "Menu item updated", body = ApiResponse<MenuItemResponseDto>),
        (status = 404, description = "Menu item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "menu"
)]
pub async fn update_menu_item(
    State(service): State<Arc<MenuItemService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateMenuItemDto>,
) -> Result<Json<ApiResponse<MenuItemResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

/// Delete a menu item (admin only)
#[utoipa::path(
    delete,
    path = "/admin/menu-item/{id}",
    params(
        ("id" = i64, Path, description = "Menu item ID")
    ),
    responses(
        (status = 200, description = "Menu item deleted"),
        (status = 404, description = "Menu item not found")
    ),
    security(("bearer_auth" = [])),
    tag = "menu"
)]
pub async fn delete_menu_item(
    State(service): State<Arc<MenuItemService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<i64>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(Some(id), None, None)))
}
