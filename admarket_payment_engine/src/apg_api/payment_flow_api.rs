use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewPaymentRecord, OrderId, PaymentId, PaymentRecord, PaymentStatus},
    events::{CheckoutCancelledEvent, EventProducers, PaymentCompletedEvent},
    helpers::is_valid_tx_hash,
    payment_objects::VerifiedPayment,
    traits::{PaymentStore, PaymentStoreError},
    PaymentVerificationError,
};

/// `PaymentFlowApi` owns the crypto payment record lifecycle: opening pending records, recording
/// claimed transaction hashes, and the verification decision procedure that accepts a claim and
/// flips the record to `completed`.
pub struct PaymentFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for PaymentFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentFlowApi")
    }
}

impl<B> PaymentFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> PaymentFlowApi<B>
where B: PaymentStore
{
    /// Opens a new pending payment record.
    ///
    /// Store failures are propagated. The fail-open fallback to a temporary id is the checkout
    /// state machine's policy, not the api's; see [`crate::CheckoutFlow::choose_currency`].
    pub async fn create_payment(&self, payment: NewPaymentRecord) -> Result<PaymentRecord, PaymentStoreError> {
        let record = self.db.create_payment(payment).await?;
        debug!(
            "🔄️ Payment [{}] opened for order {} ({} via {})",
            record.id, record.order_id, record.amount_usd, record.crypto_currency
        );
        Ok(record)
    }

    /// Fetches a payment record, applying the lazy expiry check.
    ///
    /// If the record's deadline has passed and it is still live, the `expired` status is persisted
    /// before the record is returned. There is no background sweeper; this read path is the only
    /// place records lapse.
    pub async fn fetch_payment(&self, id: &PaymentId) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let record = match self.db.fetch_payment(id).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        if record.status.is_live() && record.has_expired() {
            info!("🔄️ Payment [{}] passed its deadline at {}. Marking as expired.", record.id, record.expires_at);
            // The conditional update loses the race against a concurrent completion; trust
            // whatever ended up in the store.
            let expired = self.db.expire_payment(id).await?;
            return match expired {
                Some(r) => Ok(Some(r)),
                None => self.db.fetch_payment(id).await,
            };
        }
        Ok(Some(record))
    }

    /// Fetches every payment attempt recorded against an order, oldest first.
    pub async fn payments_for_order(&self, order_id: &OrderId) -> Result<Vec<PaymentRecord>, PaymentStoreError> {
        self.db.fetch_payments_for_order(order_id).await
    }

    /// Records the hash the shopper claims to have sent and moves the record to `verifying`.
    ///
    /// Returns the updated record, or `None` when the record is terminal or missing. Callers on
    /// the checkout path treat failures here as best-effort: a shopper is never blocked from the
    /// verification call because the claim write failed.
    pub async fn claim_tx_hash(
        &self,
        id: &PaymentId,
        tx_hash: &str,
    ) -> Result<Option<PaymentRecord>, PaymentStoreError> {
        let updated = self.db.claim_tx_hash(id, tx_hash).await?;
        match &updated {
            Some(r) => debug!("🔄️ Payment [{}] claimed tx hash. Status is now {}", r.id, r.status),
            None => debug!("🔄️ Claim on payment [{id}] skipped; record is terminal or missing"),
        }
        Ok(updated)
    }

    /// The verification decision procedure.
    ///
    /// In order:
    /// 1. Both fields must be present (non-blank).
    /// 2. The record is looked up. A missing record under a `temp_` id succeeds in test mode,
    ///    consistent with the fail-open policy at record creation. A missing record otherwise is
    ///    an error.
    /// 3. A lapsed deadline expires the record (persisted) and fails the call.
    /// 4. The hash must pass the format check, which is the only verification performed.
    /// 5. The completion is a conditional update; a record that already completed satisfies the
    ///    call idempotently.
    ///
    /// Fires the payment-completed event for every record this call (and only this call) flipped.
    pub async fn verify_payment(
        &self,
        payment_id: &str,
        tx_hash: &str,
    ) -> Result<VerifiedPayment, PaymentVerificationError> {
        if payment_id.trim().is_empty() || tx_hash.trim().is_empty() {
            return Err(PaymentVerificationError::MissingFields);
        }
        let id = PaymentId::from(payment_id.trim());
        let tx_hash = tx_hash.trim();

        let record = match self.fetch_payment(&id).await? {
            Some(record) => record,
            None if id.is_temporary() => {
                info!("🔄️ Payment [{id}] was never persisted. Accepting the claim in test mode.");
                return Ok(VerifiedPayment::test_mode(id, tx_hash.to_string()));
            },
            None => return Err(PaymentVerificationError::PaymentNotFound),
        };
        if record.status == PaymentStatus::Expired {
            debug!("🔄️ Verification of payment [{id}] rejected: the payment window lapsed");
            return Err(PaymentVerificationError::PaymentExpired);
        }
        if !is_valid_tx_hash(tx_hash) {
            debug!("🔄️ Verification of payment [{id}] rejected: malformed tx hash");
            return Err(PaymentVerificationError::InvalidHashFormat);
        }

        match self.db.complete_payment(&id, tx_hash).await? {
            Some(completed) => {
                info!("🔄️ Payment [{}] completed for order {} ({})", completed.id, completed.order_id, completed.amount_usd);
                self.call_payment_completed_hook(&completed).await;
                Ok(VerifiedPayment::completed(completed, tx_hash.to_string()))
            },
            // The conditional update found the record outside pending/verifying. Decide from the
            // stored row whether that is an idempotent success or a lost race with expiry.
            None => match self.db.fetch_payment(&id).await? {
                Some(record) if record.status == PaymentStatus::Completed => {
                    debug!("🔄️ Payment [{id}] was already completed. Verification is idempotent.");
                    Ok(VerifiedPayment::completed(record, tx_hash.to_string()))
                },
                Some(record) if record.status == PaymentStatus::Expired => {
                    Err(PaymentVerificationError::PaymentExpired)
                },
                Some(record) => Err(PaymentVerificationError::StorageError(PaymentStoreError::DatabaseError(
                    format!("Conditional completion of payment {id} failed with status {}", record.status),
                ))),
                None => Err(PaymentVerificationError::PaymentNotFound),
            },
        }
    }

    pub(crate) async fn call_payment_completed_hook(&self, payment: &PaymentRecord) {
        for emitter in &self.producers.payment_completed_producer {
            debug!("🔄️📬️ Notifying payment completed hook subscribers");
            let event = PaymentCompletedEvent { payment: payment.clone() };
            emitter.publish_event(event).await;
        }
    }

    /// Signals that the shopper abandoned the checkout before completing payment. Any pending
    /// record is left to lapse on its own; there is no rollback.
    pub async fn cancel_checkout(&self, order_id: &OrderId) {
        debug!("🔄️ Checkout for order {order_id} cancelled");
        for emitter in &self.producers.checkout_cancelled_producer {
            let event = CheckoutCancelledEvent { order_id: order_id.clone() };
            emitter.publish_event(event).await;
        }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}
