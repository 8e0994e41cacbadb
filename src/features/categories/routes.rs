use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public category tree endpoint (no authentication required)
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/category", get(handlers::get_categories))
        .with_state(service)
}

/// Category creation (require the admin role)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/admin/category", post(handlers::create_category))
        .with_state(service)
}
