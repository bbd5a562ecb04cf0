use std::{sync::Arc, time::Duration};

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde_json::Value;

use crate::{
    config::StripeConfig,
    data_objects::{CheckoutLine, CheckoutSession, CheckoutSessionRequest},
    helpers::sanitize_line,
    CheckoutServerError,
    CheckoutValidationError,
    StripeApiError,
};

/// The most line items a single checkout session will accept.
pub const MAX_CHECKOUT_ITEMS: usize = 50;
/// How long to wait on the webhook before giving up.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Hosted payment pages must live under this prefix. Anything else is treated as a spoofed
/// response and never shown to the shopper.
pub const HOSTED_CHECKOUT_PREFIX: &str = "https://checkout.stripe.com/";

#[derive(Clone)]
pub struct StripeApi {
    config: StripeConfig,
    client: Arc<Client>,
}

impl StripeApi {
    pub fn new(config: StripeConfig) -> Result<Self, StripeApiError> {
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Creates a hosted checkout session for the given cart.
    ///
    /// The cart is checked and sanitized before anything leaves the process: lines without a
    /// catalog UUID are dropped, and only references and option flags are forwarded, never
    /// prices. The redirect URLs are derived from `origin`, and the payment URL in the response
    /// is only accepted if it points at the hosted checkout domain.
    pub async fn create_checkout_session(
        &self,
        cart: &[CheckoutLine],
        origin: &str,
    ) -> Result<CheckoutSession, StripeApiError> {
        if cart.is_empty() {
            return Err(CheckoutValidationError::EmptyCart.into());
        }
        if cart.len() > MAX_CHECKOUT_ITEMS {
            return Err(CheckoutValidationError::TooManyItems.into());
        }
        let items = cart.iter().filter_map(sanitize_line).collect::<Vec<_>>();
        if items.is_empty() {
            return Err(CheckoutValidationError::NoValidItems.into());
        }
        let origin = origin.trim_end_matches('/');
        let body = CheckoutSessionRequest {
            items,
            success_url: format!("{origin}/checkout/success"),
            cancel_url: format!("{origin}/checkout/cancel"),
        };
        trace!("Requesting a checkout session for {} item(s)", body.items.len());
        let response =
            self.client.post(self.config.webhook_url.reveal()).json(&body).send().await.map_err(|e| {
                if e.is_timeout() {
                    warn!("The checkout webhook did not answer within {}s", REQUEST_TIMEOUT.as_secs());
                    CheckoutServerError::Timeout
                } else {
                    warn!("Could not reach the checkout webhook. {e}");
                    CheckoutServerError::Connection(e.to_string())
                }
            })?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("The checkout webhook rejected the session request. Status {status}");
            return Err(CheckoutServerError::SessionRejected { status }.into());
        }
        let payload = response.json::<Value>().await.map_err(|e| {
            warn!("Could not read the checkout webhook response. {e}");
            CheckoutServerError::Connection(e.to_string())
        })?;
        let url = payload["url"].as_str().unwrap_or_default().to_string();
        if url.is_empty() {
            warn!("The checkout webhook response did not carry a payment URL. Payload: {payload}");
            return Err(CheckoutServerError::MissingPaymentUrl.into());
        }
        if !url.starts_with(HOSTED_CHECKOUT_PREFIX) {
            warn!("Refusing to redirect to an off-host payment URL: {url}");
            return Err(CheckoutServerError::SuspiciousPaymentUrl.into());
        }
        let session_id = payload["session_id"].as_str().map(String::from);
        debug!("Checkout session created for {} item(s)", body.items.len());
        Ok(CheckoutSession { url, session_id })
    }
}
