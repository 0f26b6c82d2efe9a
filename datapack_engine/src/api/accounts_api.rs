//! Unified read API for the customer portal.

use std::fmt::Debug;

use crate::{
    db_types::{OrderView, Package, User},
    traits::{AccountApiError, AccountManagement},
};

/// `AccountApi` wraps the ledger's read queries for the portal: the logged-in user's account, the active catalog,
/// and the user's order history. It performs no authorization; callers must have authenticated the user already.
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError> {
        self.db.fetch_user_by_id(user_id).await
    }

    pub async fn user_by_phone(&self, phone: &str) -> Result<Option<User>, AccountApiError> {
        self.db.fetch_user_by_phone(phone).await
    }

    /// The customer-facing catalog: active packages only, cheapest first.
    pub async fn active_packages(&self) -> Result<Vec<Package>, AccountApiError> {
        self.db.fetch_packages(true).await
    }

    pub async fn order_by_id(&self, order_id: i64) -> Result<Option<OrderView>, AccountApiError> {
        self.db.fetch_order_by_id(order_id).await
    }

    /// The user's order history, most recent first, capped at `limit`.
    pub async fn orders_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<OrderView>, AccountApiError> {
        self.db.fetch_orders_for_user(user_id, limit).await
    }
}
