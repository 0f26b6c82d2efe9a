use dpg_common::Lbp;
use thiserror::Error;

use crate::{
    db_types::{NewOrder, Order, OrderStatusType, OrderView, Package, User},
    traits::{AccountApiError, AccountManagement},
};

/// This trait defines the mutating operations that backends must support in order to act as the ledger store for
/// the DataPack engine.
///
/// Every method is executed as a single transaction scoped to that call. There are no cross-operation
/// transactions; in particular, order creation and the new-order notification are deliberately *not* atomic with
/// each other (see [`crate::events`]).
#[allow(async_fn_in_trait)]
pub trait LedgerDatabase: Clone + AccountManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Registers a new user with a zero balance. Fails with [`LedgerError::PhoneAlreadyRegistered`] if the phone
    /// number is taken.
    async fn create_user(&self, phone: &str, password_hash: &str) -> Result<User, LedgerError>;

    /// Atomically adds `delta` (positive or negative) to the balance of the user registered under `phone`, and
    /// returns the new balance. Implementations must apply the delta in a single update statement; a
    /// fetch-then-write sequence would lose updates under concurrent activity.
    async fn adjust_balance(&self, phone: &str, delta: Lbp) -> Result<Lbp, LedgerError>;

    /// Adds a new, active package to the catalog.
    async fn create_package(&self, name: &str, price: Lbp) -> Result<Package, LedgerError>;

    /// Re-prices a catalog entry. Pending orders referencing it will be approved at the new price.
    async fn set_package_price(&self, package_id: i64, price: Lbp) -> Result<(), LedgerError>;

    /// Renames a catalog entry.
    async fn set_package_name(&self, package_id: i64, name: &str) -> Result<(), LedgerError>;

    /// Removes a package from the customer-facing catalog. Existing orders referencing it are unaffected.
    async fn disable_package(&self, package_id: i64) -> Result<(), LedgerError>;

    /// Inserts a new order in `Pending` status with the current timestamp. The referenced user must exist and
    /// the referenced package must exist and be active; all three conditions are checked inside the insert
    /// transaction, so a dangling reference surfaces as [`LedgerError::UserIdNotFound`] or
    /// [`LedgerError::PackageNotFound`] rather than a storage fault, and a package disabled concurrently with
    /// placement surfaces as [`LedgerError::PackageNotAvailable`].
    async fn insert_order(&self, order: NewOrder) -> Result<Order, LedgerError>;

    /// Approves a pending order: checks that the owning user can afford the package, then, in one atomic unit,
    /// moves the status from `Pending` to `Approved` and deducts the package price from the balance.
    ///
    /// The status write is a compare-and-set from `Pending`, so of two concurrent approvals exactly one succeeds;
    /// the other observes [`LedgerError::AlreadyFinalized`] and causes no balance mutation.
    async fn approve_order(&self, order_id: i64) -> Result<OrderView, LedgerError>;

    /// Rejects a pending order. No balance effect. Fails with [`LedgerError::AlreadyFinalized`] unless the order
    /// is `Pending`.
    async fn reject_order(&self, order_id: i64) -> Result<OrderView, LedgerError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), LedgerError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
    #[error("Phone number {0} is already registered")]
    PhoneAlreadyRegistered(String),
    #[error("No user is registered under phone number {0}")]
    UserNotFound(String),
    #[error("The requested user id {0} does not exist")]
    UserIdNotFound(i64),
    #[error("The requested package {0} does not exist")]
    PackageNotFound(i64),
    #[error("Package {0} is no longer available")]
    PackageNotAvailable(i64),
    #[error("The requested order {0} does not exist")]
    OrderNotFound(i64),
    #[error("Order {id} has already been finalized as {status}")]
    AlreadyFinalized { id: i64, status: OrderStatusType },
    #[error("Insufficient balance: {required} required but only {available} available")]
    InsufficientBalance { required: Lbp, available: Lbp },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        LedgerError::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for LedgerError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::DatabaseError(e) => LedgerError::DatabaseError(e),
            AccountApiError::QueryError(e) => LedgerError::InvalidInput(e),
        }
    }
}
