use chrono::{DateTime, Utc};
use datapack_engine::db_types::{OrderStatusType, OrderView, Package, User};
use dpg_common::Lbp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: i64,
    pub phone: String,
    pub balance: Lbp,
    pub balance_display: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            balance: user.balance,
            balance_display: format!("{} LBP", user.balance),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageResponse {
    pub id: i64,
    pub name: String,
    pub price: Lbp,
    pub price_display: String,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            name: package.name,
            price: package.price,
            price_display: format!("{} LBP", package.price),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderRequest {
    pub package_id: i64,
    /// The phone number the data package should be delivered to.
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderListParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub package_id: i64,
    pub package_name: String,
    pub price: Lbp,
    pub destination: String,
    pub status: OrderStatusType,
    pub created_at: DateTime<Utc>,
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        Self {
            id: view.id,
            package_id: view.package_id,
            package_name: view.package_name,
            price: view.package_price,
            destination: view.destination,
            status: view.status,
            created_at: view.created_at,
        }
    }
}
