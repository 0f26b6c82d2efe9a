use actix_web::{http::StatusCode, test::TestRequest};
use datapack_engine::{db_types::OrderStatusType, AdminApi, LedgerDatabase};
use dpg_common::Lbp;
use serde_json::json;

use super::helpers::{bearer, call, new_test_db};
use crate::data_objects::OrderResponse;

#[actix_web::test]
async fn placing_an_order_creates_it_pending() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76333331", Some("hunter2".to_string())).await.unwrap();
    let package = db.create_package("11 GB", Lbp::from(870_000)).await.unwrap();

    // no balance check happens at placement; the account is empty and the order is still accepted
    let req = TestRequest::post()
        .uri("/api/orders")
        .insert_header(("Authorization", bearer(creds.user.id, "76333331")))
        .set_json(json!({"package_id": package.id, "destination": "70123123"}));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::CREATED);
    let order: OrderResponse = serde_json::from_str(&body).expect("Invalid order response");
    assert_eq!(order.status, OrderStatusType::Pending);
    assert_eq!(order.package_name, "11 GB");
    assert_eq!(order.price, Lbp::from(870_000));
    assert_eq!(order.destination, "70123123");

    let req =
        TestRequest::get().uri("/api/orders").insert_header(("Authorization", bearer(creds.user.id, "76333331")));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Vec<OrderResponse> = serde_json::from_str(&body).expect("Invalid order list");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, order.id);
}

#[actix_web::test]
async fn bad_orders_are_rejected_with_useful_statuses() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76333332", Some("hunter2".to_string())).await.unwrap();
    let auth_header = ("Authorization", bearer(creds.user.id, "76333332"));
    let package = db.create_package("22 GB", Lbp::from(1_200_000)).await.unwrap();

    let req = TestRequest::post()
        .uri("/api/orders")
        .insert_header(auth_header.clone())
        .set_json(json!({"package_id": 9999, "destination": "70123123"}));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = TestRequest::post()
        .uri("/api/orders")
        .insert_header(auth_header.clone())
        .set_json(json!({"package_id": package.id, "destination": "   "}));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    db.disable_package(package.id).await.unwrap();
    let req = TestRequest::post()
        .uri("/api/orders")
        .insert_header(auth_header)
        .set_json(json!({"package_id": package.id, "destination": "70123123"}));
    let (status, _) = call(&db, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn order_listing_honours_the_limit() {
    let (_dir, db) = new_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76333333", Some("hunter2".to_string())).await.unwrap();
    let package = db.create_package("11 GB", Lbp::from(870_000)).await.unwrap();

    let mut last_id = 0;
    for i in 0..3 {
        let req = TestRequest::post()
            .uri("/api/orders")
            .insert_header(("Authorization", bearer(creds.user.id, "76333333")))
            .set_json(json!({"package_id": package.id, "destination": format!("7012312{i}")}));
        let (status, body) = call(&db, req).await;
        assert_eq!(status, StatusCode::CREATED);
        let order: OrderResponse = serde_json::from_str(&body).unwrap();
        last_id = order.id;
    }

    let req = TestRequest::get()
        .uri("/api/orders?limit=2")
        .insert_header(("Authorization", bearer(creds.user.id, "76333333")));
    let (status, body) = call(&db, req).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Vec<OrderResponse> = serde_json::from_str(&body).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, last_id);
    assert!(orders[0].id > orders[1].id);
}
