use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use admarket_payment_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    sqlite::db,
    CatalogApi,
    PaymentFlowApi,
    SqliteDatabase,
};
use futures::future::BoxFuture;
use log::*;
#[cfg(feature = "stripe")]
use stripe_tools::StripeApi;

#[cfg(feature = "stripe")]
use crate::routes::CheckoutRoute;
use crate::{
    config::ServerConfig,
    errors::{json_payload_error, ServerError},
    routes::{health, ChannelsRoute, PackagesRoute, ProductsRoute, VerifyCryptoPaymentRoute},
};

pub const EVENT_BUFFER_SIZE: usize = 25;

/// Wires the engine's event stream into the server log.
///
/// Completed payments and abandoned checkouts are announced here so that settlements can be
/// followed from the server's own records. Fulfilment stays manual; no external system is
/// notified.
pub fn create_event_handlers() -> EventHandlers {
    let mut hooks = EventHooks::default();
    hooks.on_payment_completed(|ev| {
        let payment = ev.payment;
        info!(
            "📦️ Payment [{}] for order {} settled {} in {}. The order is ready for fulfilment.",
            payment.id, payment.order_id, payment.amount_usd, payment.crypto_currency
        );
        no_op()
    });
    hooks.on_checkout_cancelled(|ev| {
        info!("📦️ The checkout for order {} was abandoned before payment.", ev.order_id);
        no_op()
    });
    EventHandlers::new(EVENT_BUFFER_SIZE, hooks)
}

fn no_op() -> BoxFuture<'static, ()> {
    Box::pin(async {})
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    db::create_database_if_missing(&config.database_url)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db::run_migrations(db.pool()).await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = create_event_handlers();
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    #[cfg(feature = "stripe")]
    let stripe_api = match &config.stripe_config {
        Some(stripe_config) => {
            Some(StripeApi::new(stripe_config.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?)
        },
        None => None,
    };
    let srv = HttpServer::new(move || {
        let payments_api = PaymentFlowApi::new(db.clone(), producers.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("apg::access_log"))
            .app_data(web::JsonConfig::default().error_handler(json_payload_error))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(catalog_api));
        let api_scope = web::scope("/api")
            .service(VerifyCryptoPaymentRoute::<SqliteDatabase>::new())
            .service(ChannelsRoute::<SqliteDatabase>::new())
            .service(ProductsRoute::<SqliteDatabase>::new())
            .service(PackagesRoute::<SqliteDatabase>::new());
        #[cfg(feature = "stripe")]
        let api_scope = match &stripe_api {
            Some(stripe_api) => api_scope.app_data(web::Data::new(stripe_api.clone())).service(CheckoutRoute::new()),
            None => api_scope,
        };
        app.service(health).service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
