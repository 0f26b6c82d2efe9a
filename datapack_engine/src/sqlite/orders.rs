use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderStatusType, OrderView},
    traits::LedgerError,
};

const ORDER_COLUMNS: &str = "id, user_id, package_id, destination, status, created_at";

/// The order view joins the order row with the owning user's current phone and balance and the package's current
/// name and price.
const VIEW_QUERY: &str = "
    SELECT
        orders.id,
        orders.user_id,
        users.phone,
        users.balance,
        orders.package_id,
        packages.name AS package_name,
        packages.price AS package_price,
        orders.destination,
        orders.status,
        orders.created_at
    FROM orders
    INNER JOIN users ON users.id = orders.user_id
    INNER JOIN packages ON packages.id = orders.package_id
";

/// Inserts a new order in `Pending` status. Referential integrity must have been checked by the caller, inside
/// the same transaction as this insert.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, LedgerError> {
    let q = format!(
        "INSERT INTO orders (user_id, package_id, destination) VALUES ($1, $2, $3) RETURNING {ORDER_COLUMNS}"
    );
    let order = sqlx::query_as::<_, Order>(&q)
        .bind(order.user_id)
        .bind(order.package_id)
        .bind(&order.destination)
        .fetch_one(conn)
        .await?;
    trace!("🗃️ Order #{} saved for user #{}", order.id, order.user_id);
    Ok(order)
}

pub async fn fetch_order_view(order_id: i64, conn: &mut SqliteConnection) -> Result<Option<OrderView>, sqlx::Error> {
    let q = format!("{VIEW_QUERY} WHERE orders.id = $1");
    sqlx::query_as::<_, OrderView>(&q).bind(order_id).fetch_optional(conn).await
}

/// Fetches up to `limit` of the user's orders, most recent (highest id) first.
pub async fn fetch_order_views_for_user(
    user_id: i64,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderView>, sqlx::Error> {
    let q = format!("{VIEW_QUERY} WHERE orders.user_id = $1 ORDER BY orders.id DESC LIMIT $2");
    sqlx::query_as::<_, OrderView>(&q).bind(user_id).bind(limit).fetch_all(conn).await
}

/// Fetches up to `limit` orders with the given status, oldest first. This is the admin review queue ordering.
pub async fn fetch_order_views_by_status(
    status: OrderStatusType,
    limit: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderView>, sqlx::Error> {
    let q = format!("{VIEW_QUERY} WHERE orders.status = $1 ORDER BY orders.id ASC LIMIT $2");
    sqlx::query_as::<_, OrderView>(&q).bind(status.to_string()).bind(limit).fetch_all(conn).await
}

/// Conditionally moves an order out of `Pending` into the given terminal status. Returns `true` if this call won
/// the transition. The `status = 'Pending'` guard is what makes concurrent finalization attempts mutually
/// exclusive: the losing writer affects zero rows.
pub async fn finalize_order_status(
    order_id: i64,
    status: OrderStatusType,
    conn: &mut SqliteConnection,
) -> Result<bool, LedgerError> {
    let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2 AND status = 'Pending'")
        .bind(status.to_string())
        .bind(order_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() == 1)
}
