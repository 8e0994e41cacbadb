use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::{SessionService, UserService};

/// Registration and login (no authentication required)
pub fn public_routes(users: Arc<UserService>, sessions: Arc<SessionService>) -> Router {
    Router::new()
        .route("/users", post(handlers::register))
        .with_state(users)
        .merge(
            Router::new()
                .route("/sessions", post(handlers::login))
                .with_state(sessions),
        )
}

/// Profile endpoints (require a session token)
pub fn protected_routes(users: Arc<UserService>) -> Router {
    Router::new()
        .route("/private/whoami", get(handlers::whoami))
        .route("/private/users/{id}", patch(handlers::update_profile))
        .with_state(users)
}

/// Account administration (require the admin role)
pub fn admin_routes(users: Arc<UserService>) -> Router {
    Router::new()
        .route("/admin/users/{id}/role", patch(handlers::change_role))
        .route("/admin/users/{id}", delete(handlers::delete_user))
        .with_state(users)
}
