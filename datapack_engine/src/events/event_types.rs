use serde::{Deserialize, Serialize};

use crate::db_types::OrderView;

/// Emitted after a new order has been committed to the ledger. Carries the joined order view so that a
/// notification channel can render the admin message (phone, destination, package, price, balance) without
/// another database round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrderEvent {
    pub order: OrderView,
}

impl NewOrderEvent {
    pub fn new(order: OrderView) -> Self {
        Self { order }
    }
}
