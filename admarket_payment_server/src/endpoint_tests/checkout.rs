use actix_web::{http::StatusCode, web, web::ServiceConfig};
use admarket_payment_engine::cart_objects::CartItem;
use apg_common::UsdAmount;
use serde_json::Value;
use stripe_tools::{StripeApi, StripeConfig};

use super::helpers::post_request;
use crate::{data_objects::CheckoutRequest, routes::CheckoutRoute};

fn cart_body(items: Vec<CartItem>) -> String {
    let request = CheckoutRequest { items, origin: "https://admarket.example".to_string() };
    serde_json::to_string(&request).unwrap()
}

#[actix_web::test]
async fn an_empty_cart_is_rejected() {
    let _ = env_logger::try_init().ok();
    let (status, body) = post_request("/checkout", &cart_body(Vec::new()), configure).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["success"], serde_json::json!(false));
    assert_eq!(response["message"], "Корзина пуста");
}

#[actix_web::test]
async fn a_cart_of_only_packages_is_rejected() {
    let _ = env_logger::try_init().ok();
    let items = vec![CartItem::package("pkg1", "Smart", "5 постов", UsdAmount::from_dollars(299))];
    let (status, body) = post_request("/checkout", &cart_body(items), configure).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["message"], "Нет валидных товаров для оплаты");
}

#[actix_web::test]
async fn an_unreachable_workflow_is_a_502() {
    let _ = env_logger::try_init().ok();
    let items = vec![CartItem::product(
        "123e4567-e89b-12d3-a456-426614174000",
        "Рекламный пост",
        "Crypto Insider",
        vec!["top6".to_string()],
        UsdAmount::from_dollars(140),
    )];
    let (status, body) = post_request("/checkout", &cart_body(items), configure).await.unwrap();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["message"], "Ошибка соединения с сервером оплаты");
}

// `.invalid` never resolves, so the session request fails without leaving the machine.
fn configure(cfg: &mut ServiceConfig) {
    let config = StripeConfig::new("https://workflow.invalid/webhook/stripe-checkout");
    let api = StripeApi::new(config).unwrap();
    cfg.service(CheckoutRoute::new()).app_data(web::Data::new(api));
}
