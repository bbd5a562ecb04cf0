//! # Admarket payment engine public API
//!
//! The `apg_api` module exposes the programmatic API for the Admarket payment engine.
//! The API is modular, so that clients can pick and choose the functionality they want: the HTTP
//! server only needs the verification logic, while an embedded storefront drives the full
//! checkout state machine.
//!
//! * [`payment_flow_api`] owns the crypto payment record lifecycle: creating pending records,
//!   recording claimed transaction hashes, and the verification decision procedure that flips a
//!   record to `completed`.
//! * [`checkout_flow`] is the multi-step checkout state machine
//!   (`select → payment → verify → success`) a shopper session walks through.
//! * [`catalog_api`] serves the storefront catalog, degrading to fixture data when the backend is
//!   unavailable.
//!
//! The other submodules in this module are support and utility types.
//!
//! # API usage
//!
//! The pattern for using all the APIs is the same. An API instance is created by supplying a
//! database backend that implements the specific backend traits required by the API.
//!
//! For example, to verify a claimed transaction hash against a stored payment record:
//!
//! ```rust,ignore
//! use admarket_payment_engine::{PaymentFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! // SqliteDatabase implements PaymentStore
//! let api = PaymentFlowApi::new(db, EventProducers::default());
//! let verified = api.verify_payment("cp_deadbeef01234567", &tx_hash).await?;
//! ```

pub mod cart_objects;
pub mod catalog_api;
pub mod catalog_objects;
pub mod checkout_flow;
pub mod errors;
pub mod fixtures;
pub mod payment_flow_api;
pub mod payment_objects;
