mod ledger;
mod order_workflow;

pub use ledger::{OrderLedger, PgOrderLedger};
pub use order_workflow::{OrderWithItems, OrderWorkflow, PlacedOrder};
