//! A thin client for the store's hosted card-checkout webhook.
//!
//! The storefront never talks to Stripe directly. Instead, a webhook (an n8n workflow in
//! production) holds the Stripe credentials and creates checkout sessions on the store's behalf.
//! This crate validates and sanitizes the shopper's cart, posts it to the webhook, and vets the
//! payment URL that comes back before anyone is redirected to it.

mod api;
mod config;
mod error;

mod data_objects;

pub mod helpers;

pub use api::{StripeApi, HOSTED_CHECKOUT_PREFIX, MAX_CHECKOUT_ITEMS, REQUEST_TIMEOUT};
pub use config::StripeConfig;
pub use data_objects::{CheckoutItem, CheckoutLine, CheckoutOptions, CheckoutSession, CheckoutSessionRequest};
pub use error::{CheckoutServerError, CheckoutValidationError, StripeApiError};
