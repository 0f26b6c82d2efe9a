use actix_web::{http::StatusCode, test::TestRequest};
use chrono::Duration;
use datapack_engine::AdminApi;
use dpg_common::Secret;
use serde_json::json;

use super::helpers::{bearer, call, new_test_db, test_auth_config};
use crate::{auth::TokenIssuer, config::AuthConfig, data_objects::LoginResponse};

#[actix_web::test]
async fn login_returns_a_usable_token() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    admin.create_user("76111111", Some("hunter2".to_string())).await.unwrap();

    let req = TestRequest::post().uri("/auth").set_json(json!({"phone": "76111111", "password": "hunter2"}));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    let res: LoginResponse = serde_json::from_str(&body).expect("Invalid login response");

    let req = TestRequest::get().uri("/api/account").insert_header(("Authorization", format!("Bearer {}", res.token)));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("76111111"));
}

#[actix_web::test]
async fn wrong_credentials_are_unauthorized() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    admin.create_user("76111112", Some("hunter2".to_string())).await.unwrap();

    let req = TestRequest::post().uri("/auth").set_json(json!({"phone": "76111112", "password": "letmein"}));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // an unknown phone number produces the identical response
    let req = TestRequest::post().uri("/auth").set_json(json!({"phone": "00000000", "password": "letmein"}));
    let (status2, body2) = call(&db, req).await;
    assert_eq!(status2, StatusCode::UNAUTHORIZED);
    assert_eq!(body, body2);
}

#[actix_web::test]
async fn missing_token_is_rejected() {
    let (_dir, db) = new_test_db().await;
    let req = TestRequest::get().uri("/api/account");
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = TestRequest::get().uri("/api/account").insert_header(("Authorization", "Bearer not-a-token"));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn tampered_and_expired_tokens_are_rejected() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76111113", Some("hunter2".to_string())).await.unwrap();

    let mut token = bearer(creds.user.id, "76111113");
    let n = token.len();
    token.replace_range(n - 4..n, "AAAA");
    let req = TestRequest::get().uri("/api/account").insert_header(("Authorization", token));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let expired_config =
        AuthConfig { token_secret: test_auth_config().token_secret, token_validity: Duration::hours(-1) };
    let token = TokenIssuer::new(&expired_config).issue_token(creds.user.id, "76111113").unwrap();
    let req = TestRequest::get().uri("/api/account").insert_header(("Authorization", format!("Bearer {token}")));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // tokens signed with a different secret are also rejected
    let foreign_config =
        AuthConfig { token_secret: Secret::new("other-secret".to_string()), token_validity: Duration::hours(1) };
    let token = TokenIssuer::new(&foreign_config).issue_token(creds.user.id, "76111113").unwrap();
    let req = TestRequest::get().uri("/api/account").insert_header(("Authorization", format!("Bearer {token}")));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
