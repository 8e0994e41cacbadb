use std::sync::Arc;

use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::menu::services::PricingLookup;
use crate::features::orders::dtos::OrderLineDto;
use crate::features::orders::models::{Order, OrderItem};
use crate::features::orders::services::OrderLedger;

/// A successfully placed order with its line items in request order
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// An existing order with its line items, as returned by listing
#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Orchestrates order placement and cancellation over the ledger.
///
/// There is no storage transaction around the multi-row writes. Placement
/// is order row first, then one row per line item; a failed item write is
/// answered with a single compensating delete of the order (the cascade
/// takes already-written siblings with it). If the compensating delete
/// fails too, the inconsistency is reported as `PartialFailure` and left
/// for manual cleanup - the workflow never retries.
///
/// Concurrent place/cancel calls against the same order id are not
/// coordinated here; the store's per-statement behavior is the only guard.
pub struct OrderWorkflow {
    ledger: Arc<dyn OrderLedger>,
    pricing: Arc<dyn PricingLookup>,
}

impl OrderWorkflow {
    pub fn new(ledger: Arc<dyn OrderLedger>, pricing: Arc<dyn PricingLookup>) -> Self {
        Self { ledger, pricing }
    }

    /// Place an order for `user_id` with the given line requests.
    ///
    /// The total is computed from current menu prices before anything is
    /// written; a price that fails to resolve aborts the whole placement
    /// with zero writes.
    pub async fn place_order(&self, user_id: i64, lines: &[OrderLineDto]) -> Result<PlacedOrder> {
        if lines.is_empty() {
            return Err(AppError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        if let Some(line) = lines.iter().find(|l| l.quantity <= 0) {
            return Err(AppError::Validation(format!(
                "Quantity for menu item {} must be positive",
                line.menu_item_id
            )));
        }

        let mut total_amount: i64 = 0;
        for line in lines {
            let price = self.pricing.price(line.menu_item_id).await?;
            total_amount += price * i64::from(line.quantity);
        }

        let created_at = Utc::now();
        let order_id = self
            .ledger
            .create_order(user_id, total_amount, created_at)
            .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            match self
                .ledger
                .create_order_item(order_id, line.menu_item_id, line.quantity)
                .await
            {
                Ok(item_id) => items.push(OrderItem {
                    id: item_id,
                    order_id,
                    menu_item_id: line.menu_item_id,
                    quantity: line.quantity,
                }),
                Err(item_err) => {
                    tracing::warn!(
                        order_id,
                        menu_item_id = line.menu_item_id,
                        error = %item_err,
                        "order item creation failed, rolling back order"
                    );

                    return match self.ledger.delete_order(order_id).await {
                        Ok(()) => Err(item_err),
                        Err(delete_err) => {
                            tracing::error!(
                                order_id,
                                error = %delete_err,
                                "compensating order delete failed"
                            );
                            Err(AppError::PartialFailure(format!(
                                "order {}: item creation failed ({}) and compensating delete failed: {}",
                                order_id, item_err, delete_err
                            )))
                        }
                    };
                }
            }
        }

        tracing::info!(order_id, user_id, total_amount, "order placed");

        Ok(PlacedOrder {
            order: Order {
                id: order_id,
                user_id,
                created_at,
                total_amount,
            },
            items,
        })
    }

    /// Cancel an order: line items are deleted first, the order row only
    /// after that succeeds. Both half-done states this can leave behind
    /// are recoverable by calling cancellation again.
    pub async fn cancel_order(&self, order_id: i64) -> Result<()> {
        self.ledger.delete_order_items_for_order(order_id).await?;
        self.ledger.delete_order(order_id).await?;

        tracing::info!(order_id, "order cancelled");

        Ok(())
    }

    /// All orders owned by `user_id`, each with its line items (one item
    /// lookup per order). An order whose items are gone comes back with an
    /// empty item list.
    pub async fn list_orders(&self, user_id: i64) -> Result<Vec<OrderWithItems>> {
        let orders = self.ledger.list_orders_for_user(user_id).await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.ledger.list_order_items(order.id).await?;
            result.push(OrderWithItems { order, items });
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use super::*;

    struct FakePricing {
        prices: HashMap<i64, i64>,
    }

    impl FakePricing {
        fn new(prices: &[(i64, i64)]) -> Self {
            Self {
                prices: prices.iter().copied().collect(),
            }
        }
    }

    #[async_trait]
    impl PricingLookup for FakePricing {
        async fn price(&self, menu_item_id: i64) -> Result<i64> {
            self.prices
                .get(&menu_item_id)
                .copied()
                .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", menu_item_id)))
        }
    }

    /// In-memory ledger with injectable failures. Deleting an order removes
    /// its items too, mirroring the ON DELETE CASCADE in the schema.
    #[derive(Default)]
    struct FakeLedger {
        orders: Mutex<Vec<Order>>,
        items: Mutex<Vec<OrderItem>>,
        next_id: AtomicI64,
        item_create_calls: AtomicUsize,
        fail_item_create_at: Option<usize>,
        fail_order_delete: AtomicBool,
        fail_item_delete: AtomicBool,
    }

    impl FakeLedger {
        fn next(&self) -> i64 {
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1
        }

        fn order_count(&self) -> usize {
            self.orders.lock().unwrap().len()
        }

        fn item_count(&self) -> usize {
            self.items.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl OrderLedger for FakeLedger {
        async fn create_order(
            &self,
            user_id: i64,
            total_amount: i64,
            created_at: DateTime<Utc>,
        ) -> Result<i64> {
            let id = self.next();
            self.orders.lock().unwrap().push(Order {
                id,
                user_id,
                created_at,
                total_amount,
            });
            Ok(id)
        }

        async fn delete_order(&self, order_id: i64) -> Result<()> {
            if self.fail_order_delete.load(Ordering::SeqCst) {
                return Err(AppError::Internal("injected order delete failure".into()));
            }
            let mut orders = self.orders.lock().unwrap();
            let before = orders.len();
            orders.retain(|o| o.id != order_id);
            if orders.len() == before {
                return Err(AppError::NotFound(format!("Order {} not found", order_id)));
            }
            self.items.lock().unwrap().retain(|i| i.order_id != order_id);
            Ok(())
        }

        async fn create_order_item(
            &self,
            order_id: i64,
            menu_item_id: i64,
            quantity: i32,
        ) -> Result<i64> {
            let call = self.item_create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_item_create_at == Some(call) {
                return Err(AppError::Internal("injected item create failure".into()));
            }
            let id = self.next();
            self.items.lock().unwrap().push(OrderItem {
                id,
                order_id,
                menu_item_id,
                quantity,
            });
            Ok(id)
        }

        async fn delete_order_items_for_order(&self, order_id: i64) -> Result<()> {
            if self.fail_item_delete.load(Ordering::SeqCst) {
                return Err(AppError::Internal("injected item delete failure".into()));
            }
            self.items.lock().unwrap().retain(|i| i.order_id != order_id);
            Ok(())
        }

        async fn list_orders_for_user(&self, user_id: i64) -> Result<Vec<Order>> {
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn list_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.order_id == order_id)
                .cloned()
                .collect())
        }
    }

    fn workflow(ledger: Arc<FakeLedger>, pricing: FakePricing) -> OrderWorkflow {
        OrderWorkflow::new(ledger, Arc::new(pricing))
    }

    fn line(menu_item_id: i64, quantity: i32) -> OrderLineDto {
        OrderLineDto {
            menu_item_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_place_order_computes_total_from_current_prices() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500), (2, 300)]));

        let placed = wf
            .place_order(7, &[line(1, 2), line(2, 1)])
            .await
            .unwrap();

        assert_eq!(placed.order.total_amount, 1300);
        assert_eq!(placed.order.user_id, 7);
        assert_eq!(placed.items.len(), 2);
        assert_eq!(placed.items[0].quantity, 2);
        assert_eq!(placed.items[1].quantity, 1);
        assert!(placed.items.iter().all(|i| i.order_id == placed.order.id));
        assert_eq!(ledger.order_count(), 1);
        assert_eq!(ledger.item_count(), 2);
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_lines_before_writing() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[]));

        let err = wf.place_order(1, &[]).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(ledger.order_count(), 0);
    }

    #[tokio::test]
    async fn test_place_order_rejects_non_positive_quantity() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 100)]));

        let err = wf.place_order(1, &[line(1, 0)]).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(ledger.order_count(), 0);
        assert_eq!(ledger.item_count(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_price_aborts_with_zero_writes() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500)]));

        // Second line has no price; nothing may be written for the first.
        let err = wf
            .place_order(1, &[line(1, 1), line(99, 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(ledger.order_count(), 0);
        assert_eq!(ledger.item_count(), 0);
    }

    #[tokio::test]
    async fn test_item_failure_rolls_back_order_and_siblings() {
        let ledger = Arc::new(FakeLedger {
            fail_item_create_at: Some(1), // second item write fails
            ..FakeLedger::default()
        });
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500), (2, 300)]));

        let err = wf
            .place_order(1, &[line(1, 1), line(2, 1)])
            .await
            .unwrap_err();

        // The original item-create error is surfaced, not PartialFailure.
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(ledger.order_count(), 0);
        assert_eq!(ledger.item_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_compensation_surfaces_partial_failure() {
        let ledger = Arc::new(FakeLedger {
            fail_item_create_at: Some(1),
            fail_order_delete: AtomicBool::new(true),
            ..FakeLedger::default()
        });
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500), (2, 300)]));

        let err = wf
            .place_order(1, &[line(1, 1), line(2, 1)])
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PartialFailure(_)));
        // Known-inconsistent leftovers: the order and the first item.
        assert_eq!(ledger.order_count(), 1);
        assert_eq!(ledger.item_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_removes_items_then_order() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500)]));

        let placed = wf.place_order(3, &[line(1, 2)]).await.unwrap();
        wf.cancel_order(placed.order.id).await.unwrap();

        assert_eq!(ledger.order_count(), 0);
        assert_eq!(ledger.item_count(), 0);
        assert!(wf.list_orders(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_keeps_order_when_item_delete_fails() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500)]));

        let placed = wf.place_order(3, &[line(1, 1)]).await.unwrap();
        ledger.fail_item_delete.store(true, Ordering::SeqCst);

        let err = wf.cancel_order(placed.order.id).await.unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        // Fully consistent and re-drivable: order and item both intact.
        assert_eq!(ledger.order_count(), 1);
        assert_eq!(ledger.item_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_unknown_order_is_not_found() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger, FakePricing::new(&[]));

        let err = wf.cancel_order(424242).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_cancel_tolerates_order_without_items() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500)]));

        let placed = wf.place_order(3, &[line(1, 1)]).await.unwrap();
        // Simulate a cancellation that died between the two deletes.
        ledger.items.lock().unwrap().clear();

        wf.cancel_order(placed.order.id).await.unwrap();

        assert_eq!(ledger.order_count(), 0);
    }

    #[tokio::test]
    async fn test_list_orders_pairs_each_order_with_its_items() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500), (2, 300)]));

        let first = wf.place_order(9, &[line(1, 1)]).await.unwrap();
        let second = wf.place_order(9, &[line(2, 2), line(1, 1)]).await.unwrap();
        wf.place_order(8, &[line(1, 1)]).await.unwrap(); // other user

        let orders = wf.list_orders(9).await.unwrap();

        assert_eq!(orders.len(), 2);
        let by_id: HashMap<i64, usize> = orders
            .iter()
            .map(|o| (o.order.id, o.items.len()))
            .collect();
        assert_eq!(by_id[&first.order.id], 1);
        assert_eq!(by_id[&second.order.id], 2);
    }

    #[tokio::test]
    async fn test_order_without_items_lists_as_empty() {
        let ledger = Arc::new(FakeLedger::default());
        let wf = workflow(ledger.clone(), FakePricing::new(&[(1, 500)]));

        let placed = wf.place_order(5, &[line(1, 1)]).await.unwrap();
        ledger.items.lock().unwrap().clear();

        let orders = wf.list_orders(5).await.unwrap();

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order.id, placed.order.id);
        assert!(orders[0].items.is_empty());
    }
}
