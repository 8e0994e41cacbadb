use std::sync::Arc;

use axum::{
    routing::{patch, post},
    Router,
};

use crate::features::menu::handlers;
use crate::features::menu::services::MenuItemService;

/// Menu item management (require the admin role)
pub fn admin_routes(service: Arc<MenuItemService>) -> Router {
    Router::new()
        .route("/admin/menu-item", post(handlers::create_menu_item))
        .route(
            "/admin/menu-item/{id}",
            patch(handlers::update_menu_item).delete(handlers::delete_menu_item),
        )
        .with_state(service)
}
