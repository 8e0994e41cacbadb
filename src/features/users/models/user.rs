use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

/// Database model for a user account. The password hash never leaves the
/// service layer; responses go through `UserResponseDto`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub encrypted_password: String,
    pub username: String,
    pub role: String,
}

/// Authenticated user resolved from a session token, carried in request
/// extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
