//! DataPack Engine
//!
//! The DataPack Engine is the order-management and balance-ledger core of the DataPack gateway. Customers hold an
//! internal LBP balance that an administrator tops up manually; orders for data packages are placed against that
//! balance and sit in a pending queue until the administrator approves or rejects them.
//!
//! The library is divided into three main sections:
//! 1. Database management and control ([`mod@traits`] and the SQLite backend). You should never need to access the
//!    database directly. Instead, use the public API provided by the engine. The exception is the data types used in
//!    the database, which are defined in the [`mod@db_types`] module and are public.
//! 2. The engine public API ([`mod@api`]). [`OrderFlowApi`] drives the order state machine (place, approve, reject),
//!    [`AccountApi`] answers read queries for the customer portal, and [`AdminApi`] exposes the administrator
//!    operations (user creation, top-ups, catalog management).
//! 3. A set of events that can be subscribed to ([`mod@events`]). When a new order is created, a `NewOrderEvent` is
//!    emitted so that a notification channel (e.g. the admin chat bot) can pick it up without being able to block or
//!    fail order placement.

pub mod api;
pub mod db_types;
pub mod events;
pub mod helpers;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use api::{AccountApi, AdminApi, OrderFlowApi};
pub use traits::{AccountApiError, AccountManagement, LedgerDatabase, LedgerError};
