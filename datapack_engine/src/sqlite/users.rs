use dpg_common::Lbp;
use log::trace;
use sqlx::SqliteConnection;

use crate::{db_types::User, traits::LedgerError};

const USER_COLUMNS: &str = "id, phone, password_hash, balance, created_at";

pub async fn insert_user(phone: &str, password_hash: &str, conn: &mut SqliteConnection) -> Result<User, LedgerError> {
    let q = format!(
        "INSERT INTO users (phone, password_hash, balance) VALUES ($1, $2, 0) RETURNING {USER_COLUMNS}"
    );
    let result = sqlx::query_as::<_, User>(&q).bind(phone).bind(password_hash).fetch_one(conn).await;
    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(de)) if de.is_unique_violation() => {
            Err(LedgerError::PhoneAlreadyRegistered(phone.to_string()))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn user_by_id(user_id: i64, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let q = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&q).bind(user_id).fetch_optional(conn).await
}

pub async fn user_by_phone(phone: &str, conn: &mut SqliteConnection) -> Result<Option<User>, sqlx::Error> {
    let q = format!("SELECT {USER_COLUMNS} FROM users WHERE phone = $1");
    sqlx::query_as::<_, User>(&q).bind(phone).fetch_optional(conn).await
}

/// Applies `delta` to the user's balance as a single update statement and returns the new balance. The increment
/// happens inside the database engine, so concurrent adjustments serialize there and no update is ever lost.
pub async fn adjust_balance(phone: &str, delta: Lbp, conn: &mut SqliteConnection) -> Result<Lbp, LedgerError> {
    let new_balance = sqlx::query_scalar::<_, Lbp>(
        "UPDATE users SET balance = balance + $1 WHERE phone = $2 RETURNING balance",
    )
    .bind(delta)
    .bind(phone)
    .fetch_optional(conn)
    .await?;
    match new_balance {
        Some(balance) => {
            trace!("🗃️ Balance for {phone} adjusted by {delta} to {balance}");
            Ok(balance)
        },
        None => Err(LedgerError::UserNotFound(phone.to_string())),
    }
}

/// Deducts `amount` from the user's balance by internal id. Only called from inside the order approval
/// transaction, after the funds check has passed.
pub async fn debit_balance(user_id: i64, amount: Lbp, conn: &mut SqliteConnection) -> Result<(), LedgerError> {
    let result = sqlx::query("UPDATE users SET balance = balance - $1 WHERE id = $2")
        .bind(amount)
        .bind(user_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(LedgerError::UserIdNotFound(user_id));
    }
    Ok(())
}

/// Checks that a user row exists. Used to validate referential integrity before inserting an order.
pub async fn user_exists(user_id: i64, conn: &mut SqliteConnection) -> Result<bool, sqlx::Error> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1").bind(user_id).fetch_optional(conn).await?;
    Ok(id.is_some())
}
