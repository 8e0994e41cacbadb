use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::orders::models::OrderItem;
use crate::features::orders::services::{OrderWithItems, PlacedOrder};

/// One requested line of an order
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDto {
    pub menu_item_id: i64,
    pub quantity: i32,
}

/// Request DTO for placing an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderDto {
    #[validate(length(min = 1, message = "Order must contain at least one item"))]
    pub items: Vec<OrderLineDto>,
}

/// Response DTO for one persisted line item
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponseDto {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
}

impl From<OrderItem> for OrderItemResponseDto {
    fn from(i: OrderItem) -> Self {
        Self {
            id: i.id,
            order_id: i.order_id,
            menu_item_id: i.menu_item_id,
            quantity: i.quantity,
        }
    }
}

/// Response DTO for an order with its line items
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponseDto {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub total_price: i64,
    pub order_items: Vec<OrderItemResponseDto>,
}

impl From<PlacedOrder> for OrderResponseDto {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            id: placed.order.id,
            created_at: placed.order.created_at,
            total_price: placed.order.total_amount,
            order_items: placed.items.into_iter().map(|i| i.into()).collect(),
        }
    }
}

impl From<OrderWithItems> for OrderResponseDto {
    fn from(o: OrderWithItems) -> Self {
        Self {
            id: o.order.id,
            created_at: o.order.created_at,
            total_price: o.order.total_amount,
            order_items: o.items.into_iter().map(|i| i.into()).collect(),
        }
    }
}
