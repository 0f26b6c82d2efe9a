//! # DataPack engine public API
//!
//! The `api` module exposes the programmatic API for the DataPack engine. The API is modular, so that clients can
//! pick and choose the functionality they need; the customer portal only constructs the read-side and order-flow
//! APIs, while the admin gateway also constructs [`AdminApi`].
//!
//! * [`order_flow_api`] drives the order state machine: placement, approval, rejection.
//! * [`accounts_api`] answers read queries about users, the catalog, and order histories.
//! * [`admin_api`] exposes the administrator operations: user creation, balance top-ups, catalog management.
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a database backend that
//! implements the backend traits required by the API:
//!
//! ```rust,ignore
//! use datapack_engine::{AccountApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/store.db", 5).await?;
//! let api = AccountApi::new(db);
//! let user = api.user_by_phone("76123456").await?;
//! ```

pub mod accounts_api;
pub mod admin_api;
pub mod order_flow_api;

pub use accounts_api::AccountApi;
pub use admin_api::{AdminApi, NewUserCredentials};
pub use order_flow_api::OrderFlowApi;
