use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::orders::dtos::{OrderResponseDto, PlaceOrderDto};
use crate::features::orders::services::OrderWorkflow;
use crate::features::users::models::CurrentUser;
use crate::shared::types::ApiResponse;

/// Place an order for the authenticated user
#[utoipa::path(
    post,
    path = "/private/orders",
    request_body = PlaceOrderDto,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown menu item"),
        (status = 500, description = "Storage failure (order may have been rolled back)")
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn place_order(
    user: CurrentUser,
    State(workflow): State<Arc<OrderWorkflow>>,
    AppJson(dto): AppJson<PlaceOrderDto>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<OrderResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let placed = workflow.place_order(user.id, &dto.items).await?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::success(Some(placed.into()), None, None)),
    ))
}

/// Cancel an order
#[utoipa::path(
    delete,
    path = "/private/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order cancelled"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn cancel_order(
    State(workflow): State<Arc<OrderWorkflow>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    workflow.cancel_order(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Order cancelled".to_string()),
        None,
    )))
}

/// All orders of the authenticated user, newest first
#[utoipa::path(
    get,
    path = "/private/allMyOrders",
    responses(
        (status = 200, description = "Orders with their line items", body = ApiResponse<Vec<OrderResponseDto>>),
    ),
    security(("bearer_auth" = [])),
    tag = "orders"
)]
pub async fn list_my_orders(
    user: CurrentUser,
    State(workflow): State<Arc<OrderWorkflow>>,
) -> Result<Json<ApiResponse<Vec<OrderResponseDto>>>> {
    let orders = workflow.list_orders(user.id).await?;
    let orders: Vec<OrderResponseDto> = orders.into_iter().map(|o| o.into()).collect();
    Ok(Json(ApiResponse::success(Some(orders), None, None)))
}
