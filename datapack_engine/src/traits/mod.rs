//! # Database management and control.
//!
//! This module defines the interface contracts that ledger database *backends* must implement.
//!
//! ## The ledger
//! The ledger is the durable record of users, their LBP balances, the package catalog, and orders. Balance
//! arithmetic is a storage-layer primitive: callers pass a delta and the backend applies it as a single atomic
//! update, so concurrent top-ups and deductions never lose an update.
//!
//! ## Traits
//! * [`LedgerDatabase`] defines the mutating operations. Every operation is a single transaction; either all of its
//!   effects are visible or none are.
//! * [`AccountManagement`] provides read queries for users, packages and order views.

mod account_management;
mod ledger_database;

pub use account_management::{AccountApiError, AccountManagement};
pub use ledger_database::{LedgerDatabase, LedgerError};
