use std::fmt::Debug;

use dpg_common::Lbp;
use log::{debug, trace};
use sqlx::SqlitePool;

use super::{db_url, new_pool, orders, packages, users, SqliteDatabaseError};
use crate::{
    db_types::{NewOrder, Order, OrderStatusType, OrderView, Package, User},
    traits::{AccountApiError, AccountManagement, LedgerDatabase, LedgerError},
};

/// The five catalog entries the original deployment shipped with. Only inserted into an empty catalog.
const DEFAULT_CATALOG: [(&str, i64); 5] =
    [("11 GB", 870_000), ("22 GB", 1_200_000), ("33 GB", 1_450_000), ("44 GB", 1_860_000), ("55 GB", 2_280_000)];

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API object using the URL from the `DPG_DATABASE_URL` environment variable.
    pub async fn new(max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    /// Connects to the given database, creating it if necessary, and brings the schema up to date.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, SqliteDatabaseError> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        sqlx::migrate!("./src/sqlite/migrations").run(&pool).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Inserts the default catalog if, and only if, the catalog is empty. Controlled by the `DPG_SEED_PACKAGES`
    /// flag in the server.
    pub async fn seed_default_packages(&self) -> Result<usize, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(LedgerError::from)?;
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM packages")
            .fetch_one(&mut *tx)
            .await
            .map_err(LedgerError::from)?;
        if count > 0 {
            return Ok(0);
        }
        for (name, price) in DEFAULT_CATALOG {
            packages::insert_package(name, Lbp::from(price), &mut tx).await?;
        }
        tx.commit().await.map_err(LedgerError::from)?;
        debug!("🗃️ Seeded the default catalog ({} packages)", DEFAULT_CATALOG.len());
        Ok(DEFAULT_CATALOG.len())
    }
}

impl AccountManagement for SqliteDatabase {
    async fn fetch_user_by_id(&self, user_id: i64) -> Result<Option<User>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::user_by_id(user_id, &mut conn).await?)
    }

    async fn fetch_user_by_phone(&self, phone: &str) -> Result<Option<User>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(users::user_by_phone(phone, &mut conn).await?)
    }

    async fn fetch_package_by_id(&self, package_id: i64) -> Result<Option<Package>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(packages::package_by_id(package_id, &mut conn).await?)
    }

    async fn fetch_packages(&self, active_only: bool) -> Result<Vec<Package>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(packages::fetch_packages(active_only, &mut conn).await?)
    }

    async fn fetch_order_by_id(&self, order_id: i64) -> Result<Option<OrderView>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_view(order_id, &mut conn).await?)
    }

    async fn fetch_orders_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<OrderView>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_views_for_user(user_id, limit, &mut conn).await?)
    }

    async fn fetch_orders_by_status(
        &self,
        status: OrderStatusType,
        limit: i64,
    ) -> Result<Vec<OrderView>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        Ok(orders::fetch_order_views_by_status(status, limit, &mut conn).await?)
    }
}

impl LedgerDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn create_user(&self, phone: &str, password_hash: &str) -> Result<User, LedgerError> {
        let mut conn = self.pool.acquire().await.map_err(LedgerError::from)?;
        let user = users::insert_user(phone, password_hash, &mut conn).await?;
        debug!("🗃️ User #{} registered under {}", user.id, user.phone);
        Ok(user)
    }

    async fn adjust_balance(&self, phone: &str, delta: Lbp) -> Result<Lbp, LedgerError> {
        let mut conn = self.pool.acquire().await.map_err(LedgerError::from)?;
        users::adjust_balance(phone, delta, &mut conn).await
    }

    async fn create_package(&self, name: &str, price: Lbp) -> Result<Package, LedgerError> {
        let mut conn = self.pool.acquire().await.map_err(LedgerError::from)?;
        packages::insert_package(name, price, &mut conn).await
    }

    async fn set_package_price(&self, package_id: i64, price: Lbp) -> Result<(), LedgerError> {
        let mut conn = self.pool.acquire().await.map_err(LedgerError::from)?;
        packages::set_price(package_id, price, &mut conn).await
    }

    async fn set_package_name(&self, package_id: i64, name: &str) -> Result<(), LedgerError> {
        let mut conn = self.pool.acquire().await.map_err(LedgerError::from)?;
        packages::set_name(package_id, name, &mut conn).await
    }

    async fn disable_package(&self, package_id: i64) -> Result<(), LedgerError> {
        let mut conn = self.pool.acquire().await.map_err(LedgerError::from)?;
        packages::set_active(package_id, false, &mut conn).await
    }

    /// Inserts the order and its referential-integrity checks in one transaction, so the order row can never
    /// appear with a dangling user reference or against a missing or disabled package. Reading the package row
    /// inside the transaction closes the race with a concurrent `disable_package`.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(LedgerError::from)?;
        if !users::user_exists(order.user_id, &mut tx).await.map_err(LedgerError::from)? {
            return Err(LedgerError::UserIdNotFound(order.user_id));
        }
        let package = packages::package_by_id(order.package_id, &mut tx)
            .await
            .map_err(LedgerError::from)?
            .ok_or(LedgerError::PackageNotFound(order.package_id))?;
        if !package.active {
            return Err(LedgerError::PackageNotAvailable(order.package_id));
        }
        let order = orders::insert_order(order, &mut tx).await?;
        tx.commit().await.map_err(LedgerError::from)?;
        debug!("🗃️ Order #{} has been saved in the DB", order.id);
        Ok(order)
    }

    /// The approval effect (status transition plus balance deduction) is a single transaction. The first
    /// statement is the conditional status write, so concurrent approvals serialize on it and exactly one can
    /// win; the loser rolls back without touching the balance. An insufficient balance also rolls the status
    /// write back, leaving the order `Pending`.
    async fn approve_order(&self, order_id: i64) -> Result<OrderView, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(LedgerError::from)?;
        let won = orders::finalize_order_status(order_id, OrderStatusType::Approved, &mut tx).await?;
        if !won {
            let status = orders::fetch_order_view(order_id, &mut tx).await.map_err(LedgerError::from)?;
            tx.rollback().await.map_err(LedgerError::from)?;
            return Err(match status {
                None => LedgerError::OrderNotFound(order_id),
                Some(view) => LedgerError::AlreadyFinalized { id: order_id, status: view.status },
            });
        }
        let view = orders::fetch_order_view(order_id, &mut tx)
            .await
            .map_err(LedgerError::from)?
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        if view.balance < view.package_price {
            tx.rollback().await.map_err(LedgerError::from)?;
            return Err(LedgerError::InsufficientBalance { required: view.package_price, available: view.balance });
        }
        users::debit_balance(view.user_id, view.package_price, &mut tx).await?;
        let view = orders::fetch_order_view(order_id, &mut tx)
            .await
            .map_err(LedgerError::from)?
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        tx.commit().await.map_err(LedgerError::from)?;
        debug!("🗃️ Order #{order_id} approved. {} deducted from user #{}", view.package_price, view.user_id);
        Ok(view)
    }

    async fn reject_order(&self, order_id: i64) -> Result<OrderView, LedgerError> {
        let mut tx = self.pool.begin().await.map_err(LedgerError::from)?;
        let won = orders::finalize_order_status(order_id, OrderStatusType::Rejected, &mut tx).await?;
        if !won {
            let status = orders::fetch_order_view(order_id, &mut tx).await.map_err(LedgerError::from)?;
            tx.rollback().await.map_err(LedgerError::from)?;
            return Err(match status {
                None => LedgerError::OrderNotFound(order_id),
                Some(view) => LedgerError::AlreadyFinalized { id: order_id, status: view.status },
            });
        }
        let view = orders::fetch_order_view(order_id, &mut tx)
            .await
            .map_err(LedgerError::from)?
            .ok_or(LedgerError::OrderNotFound(order_id))?;
        tx.commit().await.map_err(LedgerError::from)?;
        debug!("🗃️ Order #{order_id} rejected");
        Ok(view)
    }

    async fn close(&mut self) -> Result<(), LedgerError> {
        self.pool.close().await;
        Ok(())
    }
}
