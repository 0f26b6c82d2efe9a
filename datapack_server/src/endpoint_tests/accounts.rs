use actix_web::{http::StatusCode, test::TestRequest};
use datapack_engine::AdminApi;
use dpg_common::Lbp;

use super::helpers::{bearer, call, new_test_db};
use crate::data_objects::{AccountResponse, PackageResponse};

#[actix_web::test]
async fn account_reflects_topups() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76222221", Some("hunter2".to_string())).await.unwrap();
    admin.adjust_balance("76222221", Lbp::from(1_000_000)).await.unwrap();

    let req =
        TestRequest::get().uri("/api/account").insert_header(("Authorization", bearer(creds.user.id, "76222221")));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    let account: AccountResponse = serde_json::from_str(&body).expect("Invalid account response");
    assert_eq!(account.phone, "76222221");
    assert_eq!(account.balance, Lbp::from(1_000_000));
    assert_eq!(account.balance_display, "1,000,000 LBP");
}

#[actix_web::test]
async fn catalog_lists_active_packages_cheapest_first() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76222222", Some("hunter2".to_string())).await.unwrap();
    db.seed_default_packages().await.unwrap();

    // the catalog requires a logged-in customer
    let req = TestRequest::get().uri("/api/packages");
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req =
        TestRequest::get().uri("/api/packages").insert_header(("Authorization", bearer(creds.user.id, "76222222")));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    let catalog: Vec<PackageResponse> = serde_json::from_str(&body).expect("Invalid catalog response");
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog[0].name, "11 GB");
    assert_eq!(catalog[0].price, Lbp::from(870_000));
    assert!(catalog.windows(2).all(|w| w[0].price <= w[1].price));
}
