//! # Database management and control.
//!
//! This module provides the interfaces that define the contracts of the payment engine database
//! *backends*.
//!
//! ## Payment records
//! A payment record tracks one crypto payment attempt for a storefront order: the amount owed, the
//! chosen currency and destination wallet, and a forward-only status
//! (`pending → verifying → completed | expired`).
//!
//! The [`PaymentStore`] trait provides the mechanisms for creating these records and moving them
//! through their lifecycle. Status transitions are expressed as conditional updates so that two
//! racing verification attempts cannot both flip the same record.
//!
//! ## Catalog
//! The [`CatalogStore`] trait provides read-only access to the storefront catalog (channels,
//! placements and bundles). The engine treats it as untrusted: callers fall back to compiled-in
//! fixture data when a read fails.
mod catalog_store;
mod payment_store;

pub use catalog_store::{CatalogStore, CatalogStoreError};
pub use payment_store::{PaymentStore, PaymentStoreError};
