use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::orders::handlers;
use crate::features::orders::services::OrderWorkflow;

/// Order endpoints (require a session token)
pub fn protected_routes(workflow: Arc<OrderWorkflow>) -> Router {
    Router::new()
        .route("/private/orders", post(handlers::place_order))
        .route("/private/orders/{id}", delete(handlers::cancel_order))
        .route("/private/allMyOrders", get(handlers::list_my_orders))
        .with_state(workflow)
}
