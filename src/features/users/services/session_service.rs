use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{LoginDto, SessionResponseDto};
use crate::features::users::models::CurrentUser;
use crate::features::users::services::user_service::verify_password;
use crate::features::users::services::UserService;

/// Service for issuing and resolving session tokens
pub struct SessionService {
    pool: PgPool,
    users: Arc<UserService>,
    ttl: Duration,
}

impl SessionService {
    pub fn new(pool: PgPool, users: Arc<UserService>, ttl: Duration) -> Self {
        Self { pool, users, ttl }
    }

    /// Verify credentials and issue a new session token.
    ///
    /// A missing account and a wrong password produce the same error so the
    /// endpoint does not leak which emails are registered.
    pub async fn login(&self, dto: LoginDto) -> Result<SessionResponseDto> {
        let user = self.users.find_by_email(&dto.email).await?;

        let user = match user {
            Some(u) if verify_password(&u.encrypted_password, &dto.password)? => u,
            _ => {
                return Err(AppError::Unauthorized(
                    "Incorrect email or password".to_string(),
                ))
            }
        };

        let token = Uuid::new_v4();
        let expires_at = Utc::now()
            + chrono::Duration::from_std(self.ttl)
                .map_err(|e| AppError::Internal(format!("Invalid session TTL: {}", e)))?;

        sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(user.id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create session: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(user_id = user.id, "session created");

        Ok(SessionResponseDto { token, expires_at })
    }

    /// Resolve a bearer token to its user. Expired tokens are treated the
    /// same as unknown ones.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser> {
        let token = Uuid::parse_str(token)
            .map_err(|_| AppError::Unauthorized("Invalid session token".to_string()))?;

        let user = sqlx::query_as::<_, CurrentUser>(
            r#"
            SELECT u.id, u.email, u.username, u.role
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve session: {:?}", e);
            AppError::Database(e)
        })?;

        user.ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()))
    }
}
