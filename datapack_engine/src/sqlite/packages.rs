use dpg_common::Lbp;
use log::debug;
use sqlx::SqliteConnection;

use crate::{db_types::Package, traits::LedgerError};

pub async fn insert_package(name: &str, price: Lbp, conn: &mut SqliteConnection) -> Result<Package, LedgerError> {
    let package = sqlx::query_as::<_, Package>(
        "INSERT INTO packages (name, price, active) VALUES ($1, $2, TRUE) RETURNING id, name, price, active",
    )
    .bind(name)
    .bind(price)
    .fetch_one(conn)
    .await?;
    debug!("🗃️ Package '{}' added to the catalog with id {}", package.name, package.id);
    Ok(package)
}

pub async fn package_by_id(package_id: i64, conn: &mut SqliteConnection) -> Result<Option<Package>, sqlx::Error> {
    sqlx::query_as::<_, Package>("SELECT id, name, price, active FROM packages WHERE id = $1")
        .bind(package_id)
        .fetch_optional(conn)
        .await
}

/// Fetches the catalog, cheapest package first.
pub async fn fetch_packages(active_only: bool, conn: &mut SqliteConnection) -> Result<Vec<Package>, sqlx::Error> {
    let q = if active_only {
        "SELECT id, name, price, active FROM packages WHERE active = TRUE ORDER BY price ASC"
    } else {
        "SELECT id, name, price, active FROM packages ORDER BY price ASC"
    };
    sqlx::query_as::<_, Package>(q).fetch_all(conn).await
}

pub async fn set_price(package_id: i64, price: Lbp, conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    let result =
        sqlx::query("UPDATE packages SET price = $1 WHERE id = $2").bind(price).bind(package_id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::PackageNotFound(package_id));
    }
    Ok(())
}

pub async fn set_name(package_id: i64, name: &str, conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    let result =
        sqlx::query("UPDATE packages SET name = $1 WHERE id = $2").bind(name).bind(package_id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::PackageNotFound(package_id));
    }
    Ok(())
}

pub async fn set_active(package_id: i64, active: bool, conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    let result =
        sqlx::query("UPDATE packages SET active = $1 WHERE id = $2").bind(active).bind(package_id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::PackageNotFound(package_id));
    }
    Ok(())
}
