//! Admarket Payment Engine
//!
//! The Admarket Payment Engine drives the cryptocurrency checkout flow for the Admarket storefront.
//! It owns the lifecycle of crypto payment records, the multi-step checkout state machine, and the
//! catalog read layer. It is provider-agnostic.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). Currently, Sqlite is the only supported backend.
//!    You should never need to access the database directly. Instead, use the public API provided by the
//!    payment engine. The exception is the data types used in the database. These are defined in the
//!    `db_types` module and are public.
//! 2. The payment engine public API ([`mod@apg_api`]). This provides the public-facing functionality of
//!    the payment engine: creating and verifying crypto payments, walking a checkout session through its
//!    steps, and serving the storefront catalog. Specific backends need to implement the traits in the
//!    [`mod@traits`] module in order to act as a backend for the Admarket Payment Server.
//!
//! The engine also provides a set of events that can be subscribed to. These events are emitted when a
//! payment completes verification, or when a shopper abandons a checkout session. A simple actor
//! framework is used so that you can easily hook into these events and perform custom actions, such as
//! clearing the cart after a successful payment.
pub mod db_types;

pub mod currencies;
pub mod events;
pub mod helpers;
pub mod traits;

mod apg_api;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use traits::{CatalogStore, CatalogStoreError, PaymentStore, PaymentStoreError};

pub use apg_api::{
    cart_objects,
    catalog_api::CatalogApi,
    catalog_objects,
    checkout_flow::{CheckoutFlow, CheckoutState},
    errors::{CheckoutError, PaymentVerificationError},
    fixtures,
    payment_flow_api::PaymentFlowApi,
    payment_objects,
};
