//! Menu category tree.
//!
//! Categories form a forest via a parent pointer; `GET /category` returns
//! the assembled tree with each category's menu items attached. Assembly is
//! a pure in-memory transform (see `services::tree_builder`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
