use crate::core::error::AppError;
use crate::features::users::models::CurrentUser;
use crate::features::users::services::SessionService;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")
                .body(Body::from("Unauthorized"))
                .unwrap();

            Err(response)
        })
    }
}

/// Resolves the bearer session token to a user and stores it in request
/// extensions for handlers and the admin guard.
pub async fn auth_middleware(
    State(sessions): State<Arc<SessionService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    // Validate Bearer format
    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthorized(
            "Invalid authorization header format".to_string(),
        ));
    }

    let token = &auth_header[7..]; // Skip "Bearer "

    // Resolve session token to its user
    let user = sessions.authenticate(token).await?;

    // Insert authenticated user into request extensions
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Guard for /admin routes; runs after `auth_middleware`.
pub async fn admin_middleware(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Insufficient privileges: requires admin role".to_string(),
        ));
    }

    tracing::info!(user_id = user.id, username = %user.username, "admin resource accessed");

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::with_admin_auth;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    async fn ping() -> &'static str {
        "pong"
    }

    fn admin_router() -> Router {
        Router::new()
            .route("/admin/ping", get(ping))
            .route_layer(axum::middleware::from_fn(admin_middleware))
    }

    #[tokio::test]
    async fn test_admin_guard_rejects_unauthenticated_request() {
        let server = TestServer::new(admin_router()).unwrap();

        let response = server.get("/admin/ping").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_guard_allows_admin() {
        let server = TestServer::new(with_admin_auth(admin_router())).unwrap();

        let response = server.get("/admin/ping").await;

        response.assert_status_ok();
        response.assert_text("pong");
    }

    #[tokio::test]
    async fn test_admin_guard_rejects_plain_user() {
        async fn inject_user(mut req: Request, next: Next) -> Response {
            req.extensions_mut().insert(CurrentUser {
                id: 2,
                email: "user@canteen.test".to_string(),
                username: "user".to_string(),
                role: "user".to_string(),
            });
            next.run(req).await
        }

        let router = admin_router().layer(axum::middleware::from_fn(inject_user));
        let server = TestServer::new(router).unwrap();

        let response = server.get("/admin/ping").await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_basic_auth_guards_swagger_routes() {
        let credentials = Arc::new("docs:secret".to_string());
        let router = Router::new()
            .route("/docs", get(ping))
            .layer(axum::middleware::from_fn(basic_auth_middleware(credentials)));
        let server = TestServer::new(router).unwrap();

        let response = server.get("/docs").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let encoded = BASE64_STANDARD.encode("docs:secret");
        let response = server
            .get("/docs")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
            )
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_basic_auth_rejects_wrong_credentials() {
        let credentials = Arc::new("docs:secret".to_string());
        let router = Router::new()
            .route("/docs", get(ping))
            .layer(axum::middleware::from_fn(basic_auth_middleware(credentials)));
        let server = TestServer::new(router).unwrap();

        let encoded = BASE64_STANDARD.encode("docs:wrong");
        let response = server
            .get("/docs")
            .add_header(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Basic {}", encoded)).unwrap(),
            )
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
