use thiserror::Error;

use crate::db_types::{OrderStatusType, OrderView, Package, User};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

/// The `AccountManagement` trait defines the read queries of the ledger: user lookups, the package catalog, and
/// order views.
///
/// The [`super::LedgerDatabase`] trait handles the actual machinery of mutating the ledger. `AccountManagement`
/// only ever observes it.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Fetches the user with the given internal id. If no user exists, `None` is returned.
    async fn fetch_user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError>;

    /// Fetches the user registered under the given phone number. If no user exists, `None` is returned.
    async fn fetch_user_by_phone(&self, phone: &str) -> Result<Option<User>, AccountApiError>;

    /// Fetches a single catalog entry, whether active or not.
    async fn fetch_package_by_id(&self, package_id: i64) -> Result<Option<Package>, AccountApiError>;

    /// Fetches the package catalog, ordered by ascending price. When `active_only` is set, disabled packages are
    /// filtered out.
    async fn fetch_packages(&self, active_only: bool) -> Result<Vec<Package>, AccountApiError>;

    /// Fetches the order with the given id, joined with its user's current phone and balance and its package's
    /// current name and price.
    async fn fetch_order_by_id(&self, order_id: i64) -> Result<Option<OrderView>, AccountApiError>;

    /// Fetches up to `limit` orders belonging to the given user, most recent (highest id) first.
    async fn fetch_orders_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<OrderView>, AccountApiError>;

    /// Fetches up to `limit` orders with the given status across all users, oldest first. This is the
    /// administrator's review queue.
    async fn fetch_orders_by_status(&self, status: OrderStatusType, limit: i64)
        -> Result<Vec<OrderView>, AccountApiError>;
}
