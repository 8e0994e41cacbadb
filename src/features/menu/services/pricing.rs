use async_trait::async_trait;

use crate::core::error::Result;

/// Current unit price of a menu item, used by order placement to compute
/// order totals. Returns `NotFound` for an unknown menu item.
#[async_trait]
pub trait PricingLookup: Send + Sync {
    async fn price(&self, menu_item_id: i64) -> Result<i64>;
}
