use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use datapack_engine::{
    events::{EventHandlers, EventHooks, EventProducers, NewOrderEvent},
    AccountApi,
    LedgerDatabase,
    OrderFlowApi,
    SqliteDatabase,
};
use log::*;

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    routes::{auth, health, my_account, my_orders, packages, place_order},
};

const EVENT_BUFFER_SIZE: usize = 25;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let mut db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.seed_packages {
        let seeded = db.seed_default_packages().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
        if seeded > 0 {
            info!("🗃️ Seeded the catalog with {seeded} default data packages");
        }
    }
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, notification_hooks());
    let producers = handlers.producers();
    handlers.start_handlers();
    let srv = create_server_instance(config, db.clone(), producers)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    db.close().await.map_err(|e| ServerError::Unspecified(e.to_string()))?;
    result
}

/// The administrator notification channel. Each new order is written to the `dpg::notifications` log target; an
/// operator tails this target (or ships it to a chat bridge) to see the same message the customer used to trigger
/// the order.
fn notification_hooks() -> EventHooks {
    let mut hooks = EventHooks::default();
    hooks.on_new_order(|ev: NewOrderEvent| {
        Box::pin(async move {
            let o = &ev.order;
            info!(
                target: "dpg::notifications",
                "📬️ New order #{id}: {phone} bought '{package}' for {price} LBP, to be delivered to {destination}. \
                 Customer balance is {balance} LBP.",
                id = o.id,
                phone = o.phone,
                package = o.package_name,
                price = o.package_price,
                destination = o.destination,
                balance = o.balance,
            );
        }) as std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>
    });
    hooks
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        let accounts_api = AccountApi::new(db.clone());
        let token_issuer = TokenIssuer::new(&config.auth);
        let api_scope = web::scope("/api")
            .service(my_account)
            .service(packages)
            .service(place_order)
            .service(my_orders);
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("dpg::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(accounts_api))
            .app_data(web::Data::new(token_issuer))
            .service(health)
            .service(auth)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
