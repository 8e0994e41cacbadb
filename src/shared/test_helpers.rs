#[cfg(test)]
use crate::features::users::models::CurrentUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_admin_user() -> CurrentUser {
    CurrentUser {
        id: 1,
        email: "admin@canteen.test".to_string(),
        username: "admin".to_string(),
        role: "admin".to_string(),
    }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

/// Wraps a router so every request carries an authenticated admin user,
/// bypassing the session lookup.
#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
