//! Route handlers for the customer portal.
//!
//! `/auth` and `/health` are open; everything under `/api` requires a valid access token, enforced by the
//! [`AuthenticatedUser`] extractor.

use actix_web::{get, post, web, HttpResponse, Responder};
use datapack_engine::{helpers::verify_password, AccountApi, OrderFlowApi, SqliteDatabase};
use log::*;

use crate::{
    auth::{AuthenticatedUser, TokenIssuer},
    data_objects::{
        AccountResponse,
        LoginRequest,
        LoginResponse,
        NewOrderRequest,
        OrderListParams,
        OrderResponse,
        PackageResponse,
    },
    errors::{AuthError, ServerError},
};

pub const DEFAULT_ORDER_LIMIT: i64 = 20;
pub const MAX_ORDER_LIMIT: i64 = 100;

/// Route handler for the health check endpoint
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

/// Exchanges a phone number and password for an access token.
///
/// Password verification is deliberately slow (PBKDF2), so it runs on the blocking thread pool. A missing account
/// and a wrong password produce the same 401 response.
#[post("/auth")]
pub async fn auth(
    body: web::Json<LoginRequest>,
    accounts: web::Data<AccountApi<SqliteDatabase>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let LoginRequest { phone, password } = body.into_inner();
    let user = accounts.user_by_phone(phone.trim()).await?.ok_or(AuthError::InvalidCredentials)?;
    let hash = user.password_hash.clone();
    let valid = web::block(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServerError::Unspecified(e.to_string()))?;
    if !valid {
        info!("🔐️ Failed login attempt for {}", user.phone);
        return Err(AuthError::InvalidCredentials.into());
    }
    let token = issuer.issue_token(user.id, &user.phone)?;
    debug!("🔐️ {} logged in", user.phone);
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// The logged-in customer's account: phone number, current balance and registration date.
#[get("/account")]
pub async fn my_account(
    user: AuthenticatedUser,
    accounts: web::Data<AccountApi<SqliteDatabase>>,
) -> Result<HttpResponse, ServerError> {
    let account = accounts.user_by_id(user.id).await?.ok_or(AuthError::AccountNotFound)?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// The purchasable catalog, cheapest package first. Disabled packages are not included.
#[get("/packages")]
pub async fn packages(
    _user: AuthenticatedUser,
    accounts: web::Data<AccountApi<SqliteDatabase>>,
) -> Result<HttpResponse, ServerError> {
    let packages =
        accounts.active_packages().await?.into_iter().map(PackageResponse::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(packages))
}

/// Places a new order for the logged-in customer. The balance is *not* checked or reserved here; the deduction
/// happens if and when an administrator approves the order.
#[post("/orders")]
pub async fn place_order(
    user: AuthenticatedUser,
    body: web::Json<NewOrderRequest>,
    orders: web::Data<OrderFlowApi<SqliteDatabase>>,
    accounts: web::Data<AccountApi<SqliteDatabase>>,
) -> Result<HttpResponse, ServerError> {
    let NewOrderRequest { package_id, destination } = body.into_inner();
    let order = orders.place_order(user.id, package_id, &destination).await?;
    let view = accounts
        .order_by_id(order.id)
        .await?
        .ok_or_else(|| ServerError::BackendError(format!("Order #{} vanished after creation", order.id)))?;
    Ok(HttpResponse::Created().json(OrderResponse::from(view)))
}

/// The logged-in customer's order history, most recent first. `?limit=` caps the result, defaulting to
/// [`DEFAULT_ORDER_LIMIT`] and never exceeding [`MAX_ORDER_LIMIT`].
#[get("/orders")]
pub async fn my_orders(
    user: AuthenticatedUser,
    params: web::Query<OrderListParams>,
    accounts: web::Data<AccountApi<SqliteDatabase>>,
) -> Result<HttpResponse, ServerError> {
    let limit = params.limit.unwrap_or(DEFAULT_ORDER_LIMIT).clamp(1, MAX_ORDER_LIMIT);
    let orders =
        accounts.orders_for_user(user.id, limit).await?.into_iter().map(OrderResponse::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(orders))
}
