use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewOrder, Order, OrderView},
    events::{EventProducers, NewOrderEvent},
    traits::{AccountManagement, LedgerDatabase, LedgerError},
};

/// `OrderFlowApi` drives the order state machine on top of the ledger store's primitives.
///
/// Orders are created in `Pending` and move exactly once, to `Approved` or `Rejected`, by administrator action.
/// Approval deducts the package price from the customer's balance; the deduction and the status change are one
/// atomic unit in the backend, so a crash can never leave a deducted-but-still-pending order behind.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> OrderFlowApi<B>
where B: LedgerDatabase
{
    /// Places a new order for `user_id`. The destination must not be empty; the package must exist and be
    /// active, which the backend verifies inside the insert transaction so a concurrent catalog change cannot
    /// slip an order past the check. On success the order is durably stored in `Pending` status and a
    /// [`NewOrderEvent`] is published to the notification hooks, best-effort; a failing or absent notification
    /// channel does not affect the stored order.
    pub async fn place_order(
        &self,
        user_id: i64,
        package_id: i64,
        destination: &str,
    ) -> Result<Order, LedgerError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(LedgerError::InvalidInput("destination must not be empty".to_string()));
        }
        let order = self.db.insert_order(NewOrder::new(user_id, package_id, destination)).await?;
        debug!("🔄️📦️ Order #{} placed by user #{user_id} for package #{package_id}", order.id);
        self.call_new_order_hook(order.id).await;
        Ok(order)
    }

    /// Loads the freshly created order's view and hands it to the new-order subscribers. Failures here are
    /// logged and swallowed; the order has already been committed.
    async fn call_new_order_hook(&self, order_id: i64) {
        if self.producers.new_order_producer.is_empty() {
            return;
        }
        let view = match self.db.fetch_order_by_id(order_id).await {
            Ok(Some(view)) => view,
            Ok(None) => {
                warn!("🔄️📦️ Order #{order_id} vanished before its notification could be sent");
                return;
            },
            Err(e) => {
                warn!("🔄️📦️ Could not load order #{order_id} for notification: {e}");
                return;
            },
        };
        for producer in &self.producers.new_order_producer {
            trace!("🔄️📦️ Notifying new-order hook subscribers of order #{order_id}");
            producer.publish_event(NewOrderEvent::new(view.clone())).await;
        }
    }

    /// Approves a pending order. Fails with `OrderNotFound`, `AlreadyFinalized` (the order was already decided)
    /// or `InsufficientBalance` (balance and status are left untouched). On success the returned view reflects
    /// the deducted balance and `Approved` status.
    pub async fn approve_order(&self, order_id: i64) -> Result<OrderView, LedgerError> {
        let view = self.db.approve_order(order_id).await?;
        info!("🔄️✅️ Order #{order_id} approved. New balance for {} is {}", view.phone, view.balance);
        Ok(view)
    }

    /// Rejects a pending order. No balance effect. Fails with `OrderNotFound` or `AlreadyFinalized`.
    pub async fn reject_order(&self, order_id: i64) -> Result<OrderView, LedgerError> {
        let view = self.db.reject_order(order_id).await?;
        info!("🔄️❌️ Order #{order_id} rejected");
        Ok(view)
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}
