//! User accounts and session-token authentication.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/users` | No | Register a new account |
//! | POST | `/sessions` | No | Log in, returns a session token |
//! | GET | `/private/whoami` | Yes | Current user |
//! | PATCH | `/private/users/{id}` | Yes | Update own email/username |
//! | PATCH | `/admin/users/{id}/role` | Admin | Change a user's role |
//! | DELETE | `/admin/users/{id}` | Admin | Delete a user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{SessionService, UserService};
