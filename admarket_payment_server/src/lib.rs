//! # Admarket payment server
//! This module hosts the HTTP surface of the Admarket storefront backend. It is responsible for:
//! Verifying crypto payment claims submitted by the checkout page.
//! Serving the storefront catalog (channels, products and packages).
//! Opening hosted card-checkout sessions through the Stripe workflow.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/verify-crypto-payment`: Accepts a `{paymentId, txHash}` claim and settles the record.
//! * `/api/channels`, `/api/products`, `/api/packages`: Catalog reads with fixture fallback.
//! * `/api/checkout`: Creates a hosted card-checkout session (only when card payments are enabled).

pub mod config;
pub mod data_objects;
pub mod errors;

pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
