use admarket_payment_engine::{cart_objects::CartItem, db_types::PaymentStatus, payment_objects::VerifiedPayment};
use serde::{Deserialize, Serialize};

/// The claim body posted by the checkout page. Both fields are optional on the wire so that a
/// half-filled claim reaches the verification logic (and its missing-field answer) instead of
/// dying in the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyPaymentRequest {
    pub payment_id: Option<String>,
    pub tx_hash: Option<String>,
}

/// The payment block of a successful verification response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    pub id: String,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentConfirmation>,
}

impl From<VerifiedPayment> for VerifyPaymentResponse {
    fn from(verified: VerifiedPayment) -> Self {
        match verified.record {
            Some(record) => Self {
                success: true,
                message: "Оплату підтверджено!".to_string(),
                payment: Some(PaymentConfirmation {
                    id: record.id.to_string(),
                    status: record.status,
                    tx_hash: Some(verified.tx_hash),
                }),
            },
            // Nothing was ever persisted under a temporary id, so there is no hash to echo back.
            None => Self {
                success: true,
                message: "Оплату підтверджено (тестовий режим)".to_string(),
                payment: Some(PaymentConfirmation {
                    id: verified.payment_id.to_string(),
                    status: PaymentStatus::Completed,
                    tx_hash: None,
                }),
            },
        }
    }
}

/// The card-checkout request: the cart as the storefront holds it, plus the page origin the
/// shopper should be returned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    pub origin: String,
}
