use actix_web::{http::StatusCode, web, web::ServiceConfig};
use admarket_payment_engine::{
    currencies::{CryptoCurrency, USDT_TRC20},
    db_types::{OrderId, PaymentId, PaymentRecord, PaymentStatus},
    events::EventProducers,
    traits::PaymentStoreError,
    PaymentFlowApi,
};
use apg_common::UsdAmount;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use super::helpers::post_request;
use crate::{endpoint_tests::mocks::MockPaymentDb, routes::VerifyCryptoPaymentRoute};

const PAYMENT_ID: &str = "cp_00a1b2c3d4e5f607";
const VALID_HASH: &str = "4f3c2a9d88b1e07c5a6d41f2e8b09c734f3c2a9d88b1e07c5a6d41f2e8b09c73";

fn pending_record(id: &PaymentId) -> PaymentRecord {
    let now = Utc::now();
    PaymentRecord {
        id: id.clone(),
        order_id: OrderId("ORD-1001".to_string()),
        amount_usd: UsdAmount::from_dollars(650),
        crypto_currency: CryptoCurrency::UsdtTrc20,
        wallet_address: USDT_TRC20.address.to_string(),
        status: PaymentStatus::Pending,
        tx_hash_provided: None,
        tx_hash_verified: None,
        created_at: now,
        updated_at: now,
        expires_at: now + Duration::hours(24),
        verified_at: None,
    }
}

fn completed_record(id: &PaymentId, tx_hash: &str) -> PaymentRecord {
    let mut record = pending_record(id);
    record.status = PaymentStatus::Completed;
    record.tx_hash_provided = Some(tx_hash.to_string());
    record.tx_hash_verified = Some(tx_hash.to_string());
    record.verified_at = Some(Utc::now());
    record
}

fn stale_record(id: &PaymentId) -> PaymentRecord {
    let mut record = pending_record(id);
    record.created_at -= Duration::hours(25);
    record.expires_at -= Duration::hours(25);
    record
}

fn expired_record(id: &PaymentId) -> PaymentRecord {
    let mut record = stale_record(id);
    record.status = PaymentStatus::Expired;
    record
}

#[actix_web::test]
async fn a_valid_claim_completes_the_payment() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": PAYMENT_ID, "txHash": VALID_HASH }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_settling_store).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(true));
    assert_eq!(response["message"], json!("Оплату підтверджено!"));
    assert_eq!(response["payment"]["id"], json!(PAYMENT_ID));
    assert_eq!(response["payment"]["status"], json!("completed"));
    assert_eq!(response["payment"]["txHash"], json!(VALID_HASH));
}

#[actix_web::test]
async fn a_half_filled_claim_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": PAYMENT_ID }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_untouched_store).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["message"], json!("Missing paymentId or txHash"));
    assert!(response.get("payment").is_none());
}

#[actix_web::test]
async fn malformed_hashes_are_rejected() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": PAYMENT_ID, "txHash": "xyz-not-a-hash" }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_pending_store).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["message"], json!("Невірний формат TX Hash"));
}

#[actix_web::test]
async fn unknown_payments_are_a_404() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": "cp_ffffffffffffffff", "txHash": VALID_HASH }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_empty_store).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["message"], json!("Платіж не знайдено"));
}

#[actix_web::test]
async fn lapsed_payments_are_reported_expired() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": PAYMENT_ID, "txHash": VALID_HASH }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_lapsed_store).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["message"], json!("Термін дії платежу закінчився"));
}

#[actix_web::test]
async fn temporary_ids_settle_in_test_mode() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": "temp_1717171717171", "txHash": VALID_HASH }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_empty_store).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(true));
    assert_eq!(response["message"], json!("Оплату підтверджено (тестовий режим)"));
    assert_eq!(response["payment"]["id"], json!("temp_1717171717171"));
    assert_eq!(response["payment"]["status"], json!("completed"));
    // Nothing was persisted, so no hash is echoed back.
    assert!(response["payment"].get("txHash").is_none());
}

#[actix_web::test]
async fn verification_is_idempotent_for_completed_payments() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": PAYMENT_ID, "txHash": VALID_HASH }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_settled_store).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(true));
    assert_eq!(response["message"], json!("Оплату підтверджено!"));
    assert_eq!(response["payment"]["status"], json!("completed"));
}

#[actix_web::test]
async fn a_dead_store_is_a_500() {
    let _ = env_logger::try_init().ok();
    let body = json!({ "paymentId": PAYMENT_ID, "txHash": VALID_HASH }).to_string();
    let (status, body) = post_request("/verify-crypto-payment", &body, configure_dead_store).await.unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["message"], json!("Помилка оновлення статусу платежу"));
}

#[actix_web::test]
async fn garbage_payloads_are_a_500() {
    let _ = env_logger::try_init().ok();
    let (status, body) =
        post_request("/verify-crypto-payment", "{ this is not json", configure_untouched_store).await.unwrap();
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], json!(false));
    assert_eq!(response["message"], json!("Внутрішня помилка сервера"));
}

fn register(cfg: &mut ServiceConfig, db: MockPaymentDb) {
    let api = PaymentFlowApi::new(db, EventProducers::default());
    cfg.service(VerifyCryptoPaymentRoute::<MockPaymentDb>::new()).app_data(web::Data::new(api));
}

fn configure_untouched_store(cfg: &mut ServiceConfig) {
    register(cfg, MockPaymentDb::new());
}

fn configure_empty_store(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentDb::new();
    db.expect_fetch_payment().returning(|_| Ok(None));
    register(cfg, db);
}

fn configure_pending_store(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentDb::new();
    db.expect_fetch_payment().returning(|id| Ok(Some(pending_record(id))));
    register(cfg, db);
}

fn configure_settling_store(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentDb::new();
    db.expect_fetch_payment().returning(|id| Ok(Some(pending_record(id))));
    db.expect_complete_payment().returning(|id, tx_hash| Ok(Some(completed_record(id, tx_hash))));
    register(cfg, db);
}

// The conditional completion returns `None` for a record that already settled; the handler must
// answer from the re-fetched row.
fn configure_settled_store(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentDb::new();
    db.expect_fetch_payment().returning(|id| Ok(Some(completed_record(id, VALID_HASH))));
    db.expect_complete_payment().returning(|_, _| Ok(None));
    register(cfg, db);
}

fn configure_lapsed_store(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentDb::new();
    db.expect_fetch_payment().returning(|id| Ok(Some(stale_record(id))));
    db.expect_expire_payment().returning(|id| Ok(Some(expired_record(id))));
    register(cfg, db);
}

fn configure_dead_store(cfg: &mut ServiceConfig) {
    let mut db = MockPaymentDb::new();
    db.expect_fetch_payment().returning(|id| Ok(Some(pending_record(id))));
    db.expect_complete_payment()
        .returning(|_, _| Err(PaymentStoreError::DatabaseError("attempt to write a readonly database".to_string())));
    register(cfg, db);
}
