use thiserror::Error;

use crate::db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord};

/// This trait defines the persistence contract for crypto payment records.
///
/// All status transitions are expressed as *conditional* updates: the `WHERE status IN (...)`
/// precondition is part of the contract, not an implementation detail. A transition whose
/// precondition does not hold returns `Ok(None)` rather than an error, and the caller decides
/// whether that is an idempotent success (the record already completed) or a failure (the record
/// expired underneath the caller).
#[allow(async_fn_in_trait)]
pub trait PaymentStore: Clone {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Inserts a new payment record with a freshly assigned key and `pending` status.
    ///
    /// Returns the stored record, including the assigned id and timestamps.
    async fn create_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, PaymentStoreError>;

    /// Fetches a payment record by its key. Returns `None` if no such record exists.
    ///
    /// The record is returned exactly as stored. Lazy expiry is the caller's job; see
    /// [`crate::PaymentFlowApi::fetch_payment`].
    async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError>;

    /// Fetches every payment record opened against the given order, oldest first.
    async fn fetch_payments_for_order(&self, order_id: &OrderId) -> Result<Vec<PaymentRecord>, PaymentStoreError>;

    /// Records the transaction hash the shopper claims to have sent, and moves the record to
    /// `verifying`.
    ///
    /// Precondition: the record status is `pending` or `verifying` (resubmitting a corrected hash
    /// is allowed). Terminal records are left untouched and `None` is returned.
    async fn claim_tx_hash(&self, id: &PaymentId, tx_hash: &str) -> Result<Option<PaymentRecord>, PaymentStoreError>;

    /// Accepts the claimed hash: sets `tx_hash_verified`, `verified_at` and flips the status to
    /// `completed`.
    ///
    /// Precondition: the record status is `pending` or `verifying`. A record that has already
    /// completed (or expired) is not rewritten and `None` is returned, closing the race between
    /// two concurrent verification attempts.
    async fn complete_payment(&self, id: &PaymentId, tx_hash: &str)
        -> Result<Option<PaymentRecord>, PaymentStoreError>;

    /// Flips the record to `expired`.
    ///
    /// Precondition: the record status is `pending` or `verifying`. Expiry never rolls back a
    /// completed payment; when the precondition fails, `None` is returned.
    async fn expire_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError>;

    /// Closes the database connection.
    async fn close(&mut self) -> Result<(), PaymentStoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
pub enum PaymentStoreError {
    #[error("There is an internal database engine issue (configuration/uptime etc.): {0}")]
    DatabaseError(String),
    #[error("Cannot insert payment, since it already exists with id {0}")]
    PaymentAlreadyExists(PaymentId),
    #[error("The requested payment {0} does not exist")]
    PaymentNotFound(PaymentId),
}

impl From<sqlx::Error> for PaymentStoreError {
    fn from(e: sqlx::Error) -> Self {
        PaymentStoreError::DatabaseError(e.to_string())
    }
}
