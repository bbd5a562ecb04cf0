use serde::{Deserialize, Serialize};

/// One cart line as the storefront holds it: a catalog reference and the add-on tokens the
/// shopper picked (`top6`, `pin24`, `pin48`, `pin72`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub reference_id: String,
    #[serde(default)]
    pub extras: Vec<String>,
}

impl CheckoutLine {
    pub fn new<S: Into<String>>(reference_id: S) -> Self {
        Self { reference_id: reference_id.into(), extras: Vec::new() }
    }
}

/// A sanitized line item. Only the catalog reference and option flags go over the wire; prices
/// are looked up server-side by the workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutItem {
    pub product_id: String,
    pub options: CheckoutOptions,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutOptions {
    pub top_6h: bool,
    pub pin_24h: bool,
    pub pin_48h: bool,
    pub pin_72h: bool,
}

/// The request body posted to the checkout webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub items: Vec<CheckoutItem>,
    pub success_url: String,
    pub cancel_url: String,
}

/// A vetted checkout session: the hosted payment page to redirect the shopper to, and the
/// session id if the workflow reported one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}
