//! Concurrency checks for the balance ledger: a storm of concurrent adjustments must never lose an update, and
//! concurrent finalization attempts on one order must succeed exactly once.

mod support;

use datapack_engine::{
    db_types::OrderStatusType,
    events::EventProducers,
    AccountManagement, AdminApi, LedgerDatabase, LedgerError, OrderFlowApi,
};
use dpg_common::Lbp;
use support::prepare_test_db;

const TASKS: usize = 10;
const ADJUSTMENTS_PER_TASK: usize = 10;

#[tokio::test]
async fn concurrent_adjustments_never_lose_updates() {
    let (_dir, db) = prepare_test_db().await;
    let admin = AdminApi::new(db.clone());
    admin.create_user("76300300", Some("pw".to_string())).await.expect("Error creating user");

    let mut join_set = tokio::task::JoinSet::new();
    for task in 0..TASKS {
        let db = db.clone();
        join_set.spawn(async move {
            for _ in 0..ADJUSTMENTS_PER_TASK {
                // even tasks credit, odd tasks debit half as much
                let delta = if task % 2 == 0 { Lbp::from(1_000) } else { Lbp::from(-500) };
                db.adjust_balance("76300300", delta).await.expect("Error adjusting balance");
            }
        });
    }
    while let Some(res) = join_set.join_next().await {
        res.expect("adjustment task panicked");
    }

    let credits = (TASKS / 2) * ADJUSTMENTS_PER_TASK * 1_000;
    let debits = (TASKS / 2) * ADJUSTMENTS_PER_TASK * 500;
    let user = db.fetch_user_by_phone("76300300").await.unwrap().unwrap();
    assert_eq!(user.balance, Lbp::from((credits - debits) as i64));
}

#[tokio::test]
async fn concurrent_approvals_deduct_once() {
    let (_dir, db) = prepare_test_db().await;
    let admin = AdminApi::new(db.clone());
    let creds = admin.create_user("76300301", Some("pw".to_string())).await.unwrap();
    admin.adjust_balance("76300301", Lbp::from(1_000_000)).await.unwrap();
    let package = db.create_package("11 GB", Lbp::from(870_000)).await.unwrap();

    let api = OrderFlowApi::new(db.clone(), EventProducers::default());
    let order = api.place_order(creds.user.id, package.id, "70000009").await.unwrap();

    let mut join_set = tokio::task::JoinSet::new();
    for _ in 0..4 {
        let db = db.clone();
        let order_id = order.id;
        join_set.spawn(async move {
            let api = OrderFlowApi::new(db, EventProducers::default());
            api.approve_order(order_id).await
        });
    }
    let mut wins = 0;
    let mut already_finalized = 0;
    while let Some(res) = join_set.join_next().await {
        match res.expect("approval task panicked") {
            Ok(view) => {
                assert_eq!(view.status, OrderStatusType::Approved);
                wins += 1;
            },
            Err(LedgerError::AlreadyFinalized { .. }) => already_finalized += 1,
            Err(e) => panic!("Unexpected error: {e}"),
        }
    }
    assert_eq!(wins, 1);
    assert_eq!(already_finalized, 3);

    let user = db.fetch_user_by_phone("76300301").await.unwrap().unwrap();
    assert_eq!(user.balance, Lbp::from(130_000));
}
