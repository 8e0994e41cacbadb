//! Menu items: admin CRUD plus the price lookup used by order placement.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{MenuItemService, PricingLookup};
