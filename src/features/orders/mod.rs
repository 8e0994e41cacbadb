//! Order placement, cancellation and listing.
//!
//! Placement is a manual two-step saga: the order row is written first,
//! then its line items; a failed item write triggers one compensating
//! delete of the order. There is no storage-level transaction around the
//! sequence (see `services::OrderWorkflow`).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{OrderLedger, OrderWorkflow, PgOrderLedger};
