//! Administrator operations: user management, balance top-ups, and catalog maintenance.
//!
//! The engine performs no authorization. The admin gateway must establish the administrator's identity before
//! calling into this API.

use std::fmt::Debug;

use dpg_common::Lbp;
use log::*;

use crate::{
    db_types::{OrderStatusType, OrderView, Package, User},
    helpers::passwords::{generate_numeric_password, hash_password},
    traits::{AccountManagement, LedgerDatabase, LedgerError},
};

/// The credentials of a freshly created user. The plaintext password is only ever available here, at creation
/// time, so the administrator can pass it on to the customer.
#[derive(Debug, Clone)]
pub struct NewUserCredentials {
    pub user: User,
    pub password: String,
}

pub struct AdminApi<B> {
    db: B,
}

impl<B> Debug for AdminApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdminApi")
    }
}

impl<B> AdminApi<B>
where B: LedgerDatabase
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Registers a new user. When `password` is `None`, a 6-digit numeric password is generated, as the original
    /// operators preferred for relaying over the phone. The stored credential is the PBKDF2 hash; the plaintext
    /// is returned once and never persisted.
    pub async fn create_user(&self, phone: &str, password: Option<String>) -> Result<NewUserCredentials, LedgerError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(LedgerError::InvalidInput("phone must not be empty".to_string()));
        }
        let password = password.unwrap_or_else(|| generate_numeric_password(6));
        let user = self.db.create_user(phone, &hash_password(&password)).await?;
        info!("🧑️ User #{} created for {}", user.id, user.phone);
        Ok(NewUserCredentials { user, password })
    }

    /// Adds `delta` to the user's balance (top-up when positive, correction when negative) and returns the new
    /// balance. The adjustment is a single atomic update in the store.
    pub async fn adjust_balance(&self, phone: &str, delta: Lbp) -> Result<Lbp, LedgerError> {
        let new_balance = self.db.adjust_balance(phone, delta).await?;
        info!("🧑️ Balance for {phone} adjusted by {delta}; now {new_balance}");
        Ok(new_balance)
    }

    pub async fn user_info(&self, phone: &str) -> Result<Option<User>, LedgerError> {
        Ok(self.db.fetch_user_by_phone(phone).await?)
    }

    /// The full catalog, disabled entries included, cheapest first.
    pub async fn all_packages(&self) -> Result<Vec<Package>, LedgerError> {
        Ok(self.db.fetch_packages(false).await?)
    }

    pub async fn create_package(&self, name: &str, price: Lbp) -> Result<Package, LedgerError> {
        if price < Lbp::from(0) {
            return Err(LedgerError::InvalidInput(format!("package price may not be negative: {price}")));
        }
        self.db.create_package(name, price).await
    }

    pub async fn set_package_price(&self, package_id: i64, price: Lbp) -> Result<(), LedgerError> {
        if price < Lbp::from(0) {
            return Err(LedgerError::InvalidInput(format!("package price may not be negative: {price}")));
        }
        self.db.set_package_price(package_id, price).await
    }

    pub async fn set_package_name(&self, package_id: i64, name: &str) -> Result<(), LedgerError> {
        self.db.set_package_name(package_id, name).await
    }

    pub async fn disable_package(&self, package_id: i64) -> Result<(), LedgerError> {
        self.db.disable_package(package_id).await
    }

    /// The administrator's review queue: pending orders, oldest first.
    pub async fn pending_orders(&self, limit: i64) -> Result<Vec<OrderView>, LedgerError> {
        Ok(self.db.fetch_orders_by_status(OrderStatusType::Pending, limit).await?)
    }
}
