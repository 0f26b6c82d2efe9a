use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use dpg_common::Lbp;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        User        ----------------------------------------------------------
/// A customer of the gateway. The phone number doubles as the login identifier and is unique. The balance is an
/// internal ledger value in LBP; it is only ever mutated through atomic increments in the storage layer.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub phone: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub balance: Lbp,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       Package       ---------------------------------------------------------
/// A purchasable catalog entry. Inactive packages are hidden from customers but stay in the catalog so that
/// historical orders still resolve against them.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub price: Lbp,
    pub active: bool,
}

//--------------------------------------   OrderStatusType   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum OrderStatusType {
    /// The order is newly created and awaits an administrator decision.
    Pending,
    /// The administrator approved the order and the package price was deducted from the balance. Terminal.
    Approved,
    /// The administrator rejected the order. No balance effect. Terminal.
    Rejected,
}

impl OrderStatusType {
    /// Orders only ever leave the `Pending` state, and never re-enter it.
    pub fn is_finalized(&self) -> bool {
        !matches!(self, OrderStatusType::Pending)
    }
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Pending => write!(f, "Pending"),
            OrderStatusType::Approved => write!(f, "Approved"),
            OrderStatusType::Rejected => write!(f, "Rejected"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct ConversionError(String);

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------       NewOrder       --------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    /// The internal id of the customer placing the order
    pub user_id: i64,
    /// The catalog entry being purchased
    pub package_id: i64,
    /// The recipient account the package must be applied to. Distinct from the buyer's own phone number.
    pub destination: String,
}

impl NewOrder {
    pub fn new(user_id: i64, package_id: i64, destination: impl Into<String>) -> Self {
        Self { user_id, package_id, destination: destination.into() }
    }
}

//--------------------------------------        Order         --------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub package_id: i64,
    pub destination: String,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      OrderView       --------------------------------------------------------
/// An order joined with its owning user's current phone and balance and its package's current name and price.
///
/// The package columns are read live from the catalog, not snapshotted at order time, so a catalog price change is
/// reflected in the view of a pending order. Approval always deducts the price as read inside the approval
/// transaction, so the deducted amount and the displayed amount cannot diverge.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct OrderView {
    pub id: i64,
    pub user_id: i64,
    pub phone: String,
    pub balance: Lbp,
    pub package_id: i64,
    pub package_name: String,
    pub package_price: Lbp,
    pub destination: String,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::OrderStatusType;

    #[test]
    fn status_round_trip() {
        for s in [OrderStatusType::Pending, OrderStatusType::Approved, OrderStatusType::Rejected] {
            assert_eq!(s.to_string().parse::<OrderStatusType>().unwrap(), s);
        }
        assert!("Paid".parse::<OrderStatusType>().is_err());
    }

    #[test]
    fn terminal_states() {
        assert!(!OrderStatusType::Pending.is_finalized());
        assert!(OrderStatusType::Approved.is_finalized());
        assert!(OrderStatusType::Rejected.is_finalized());
    }
}
