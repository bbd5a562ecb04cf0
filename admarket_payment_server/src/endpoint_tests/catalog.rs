use actix_web::{http::StatusCode, web, web::ServiceConfig};
use admarket_payment_engine::{
    catalog_objects::{Product, ProductKind},
    fixtures::{fixture_channels, fixture_packages},
    traits::CatalogStoreError,
    CatalogApi,
};
use apg_common::UsdAmount;
use serde_json::Value;

use super::helpers::get_request;
use crate::{
    endpoint_tests::mocks::MockCatalogDb,
    routes::{ChannelsRoute, PackagesRoute, ProductsRoute},
};

fn listed_product() -> Product {
    Product {
        id: "p_9_1".to_string(),
        channel_id: "9".to_string(),
        name: "Рекламный пост".to_string(),
        product_type: ProductKind::Post,
        base_price: UsdAmount::from_dollars(120),
        top_6h_price: UsdAmount::from_dollars(25),
        pin_24h_price: UsdAmount::from_dollars(45),
        pin_48h_price: UsdAmount::from_dollars(80),
        is_active: true,
    }
}

#[actix_web::test]
async fn channels_fall_back_to_fixtures_when_the_store_errors() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/channels", configure_broken_store).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let channels: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(channels.len(), fixture_channels().len());
    assert_eq!(channels[0]["name"], "Crypto Insider");
    assert_eq!(channels[0]["type"], "channel");
}

#[actix_web::test]
async fn products_come_from_the_store_when_present() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/products", configure_stocked_store).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let products: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(products, serde_json::to_value(vec![listed_product()]).unwrap());
}

#[actix_web::test]
async fn packages_fall_back_when_the_store_is_empty() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_request("/packages", configure_bare_store).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let packages: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(packages, serde_json::to_value(fixture_packages()).unwrap());
}

fn register(cfg: &mut ServiceConfig, db: MockCatalogDb) {
    let api = CatalogApi::new(db);
    cfg.service(ChannelsRoute::<MockCatalogDb>::new())
        .service(ProductsRoute::<MockCatalogDb>::new())
        .service(PackagesRoute::<MockCatalogDb>::new())
        .app_data(web::Data::new(api));
}

fn configure_broken_store(cfg: &mut ServiceConfig) {
    let mut db = MockCatalogDb::new();
    db.expect_fetch_channels()
        .returning(|| Err(CatalogStoreError::DatabaseError("no such table: channels".to_string())));
    register(cfg, db);
}

fn configure_stocked_store(cfg: &mut ServiceConfig) {
    let mut db = MockCatalogDb::new();
    db.expect_fetch_products().returning(|| Ok(vec![listed_product()]));
    register(cfg, db);
}

fn configure_bare_store(cfg: &mut ServiceConfig) {
    let mut db = MockCatalogDb::new();
    db.expect_fetch_packages().returning(|| Ok(Vec::new()));
    register(cfg, db);
}
