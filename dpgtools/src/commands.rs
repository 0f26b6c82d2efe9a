use anyhow::{anyhow, Result};
use datapack_engine::{
    events::EventProducers,
    helpers::parse_amount,
    AccountApi,
    AdminApi,
    LedgerDatabase,
    OrderFlowApi,
    SqliteDatabase,
};
use log::debug;

use crate::formatting::{format_order, format_orders, format_packages, format_user};

async fn connect() -> Result<SqliteDatabase> {
    let db = SqliteDatabase::new(1).await.map_err(|e| anyhow!("Could not open the ledger database. {e}"))?;
    debug!("Connected to the ledger at {}", db.url());
    Ok(db)
}

pub async fn create_user(phone: &str, password: Option<String>) -> Result<()> {
    let db = connect().await?;
    let creds = AdminApi::new(db).create_user(phone, password).await?;
    println!("User #{} created for {}", creds.user.id, creds.user.phone);
    println!("Password: {}", creds.password);
    println!("This password is not stored anywhere. Pass it on to the customer now.");
    Ok(())
}

pub async fn add_balance(phone: &str, amount: &str) -> Result<()> {
    let db = connect().await?;
    let delta = parse_amount(amount)?;
    let new_balance = AdminApi::new(db).adjust_balance(phone, delta).await?;
    println!("Balance for {phone} adjusted by {delta} LBP. New balance: {new_balance} LBP");
    Ok(())
}

pub async fn user_info(phone: &str) -> Result<()> {
    let db = connect().await?;
    let admin = AdminApi::new(db.clone());
    let user = admin.user_info(phone).await?.ok_or_else(|| anyhow!("No user is registered under {phone}"))?;
    println!("{}", format_user(&user));
    let orders = AccountApi::new(db).orders_for_user(user.id, 10).await?;
    println!("Recent orders:\n{}", format_orders(&orders));
    Ok(())
}

pub async fn list_packages(all: bool) -> Result<()> {
    let db = connect().await?;
    let packages = if all {
        AdminApi::new(db).all_packages().await?
    } else {
        AccountApi::new(db).active_packages().await?
    };
    println!("{}", format_packages(&packages));
    Ok(())
}

pub async fn add_package(name: &str, price: &str) -> Result<()> {
    let db = connect().await?;
    let price = parse_amount(price)?;
    let package = AdminApi::new(db).create_package(name, price).await?;
    println!("Package #{} '{}' added at {} LBP", package.id, package.name, package.price);
    Ok(())
}

pub async fn set_package_price(package_id: i64, price: &str) -> Result<()> {
    let db = connect().await?;
    let price = parse_amount(price)?;
    AdminApi::new(db).set_package_price(package_id, price).await?;
    println!("Package #{package_id} re-priced to {price} LBP. Pending orders will be approved at the new price.");
    Ok(())
}

pub async fn set_package_name(package_id: i64, name: &str) -> Result<()> {
    let db = connect().await?;
    AdminApi::new(db).set_package_name(package_id, name).await?;
    println!("Package #{package_id} renamed to '{name}'");
    Ok(())
}

pub async fn disable_package(package_id: i64) -> Result<()> {
    let db = connect().await?;
    AdminApi::new(db).disable_package(package_id).await?;
    println!("Package #{package_id} removed from the customer catalog. Existing orders are unaffected.");
    Ok(())
}

pub async fn pending_orders(limit: i64) -> Result<()> {
    let db = connect().await?;
    let orders = AdminApi::new(db).pending_orders(limit).await?;
    println!("{}", format_orders(&orders));
    Ok(())
}

pub async fn approve_order(order_id: i64) -> Result<()> {
    let db = connect().await?;
    let api = OrderFlowApi::new(db, EventProducers::default());
    let view = api.approve_order(order_id).await?;
    println!("Order #{order_id} approved.\n{}", format_order(&view));
    Ok(())
}

pub async fn reject_order(order_id: i64) -> Result<()> {
    let db = connect().await?;
    let api = OrderFlowApi::new(db, EventProducers::default());
    let view = api.reject_order(order_id).await?;
    println!("Order #{order_id} rejected.\n{}", format_order(&view));
    Ok(())
}
