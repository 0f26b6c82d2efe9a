use actix_web::{body::MessageBody, http::StatusCode, test, test::TestRequest, web, App};
use chrono::Duration;
use datapack_engine::{events::EventProducers, AccountApi, OrderFlowApi, SqliteDatabase};
use dpg_common::Secret;
use tempfile::TempDir;

use crate::{
    auth::TokenIssuer,
    config::AuthConfig,
    routes::{auth, health, my_account, my_orders, packages, place_order},
};

// A fixed secret for issuing test tokens. DO NOT re-use it anywhere.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig { token_secret: Secret::new("endpoint-test-secret".to_string()), token_validity: Duration::hours(1) }
}

pub fn bearer(user_id: i64, phone: &str) -> String {
    let token = TokenIssuer::new(&test_auth_config()).issue_token(user_id, phone).expect("Failed to issue token");
    format!("Bearer {token}")
}

pub async fn new_test_db() -> (TempDir, SqliteDatabase) {
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().expect("Error creating temporary directory");
    let url = format!("sqlite://{}", dir.path().join("portal_test.db").display());
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    (dir, db)
}

/// Runs a single request against a portal instance backed by `db` and returns the status and body.
pub async fn call(db: &SqliteDatabase, req: TestRequest) -> (StatusCode, String) {
    let app = App::new()
        .app_data(web::Data::new(OrderFlowApi::new(db.clone(), EventProducers::default())))
        .app_data(web::Data::new(AccountApi::new(db.clone())))
        .app_data(web::Data::new(TokenIssuer::new(&test_auth_config())))
        .service(health)
        .service(auth)
        .service(
            web::scope("/api").service(my_account).service(packages).service(place_order).service(my_orders),
        );
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}
