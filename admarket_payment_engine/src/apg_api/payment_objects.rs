use crate::db_types::{PaymentId, PaymentRecord};

/// The outcome of a successful verification call.
///
/// For persisted records, `record` holds the completed row as written. For `temp_`-prefixed ids
/// the backing record never existed, so verification succeeds in test mode and `record` is `None`.
#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    pub payment_id: PaymentId,
    pub tx_hash: String,
    pub record: Option<PaymentRecord>,
}

impl VerifiedPayment {
    pub fn completed(record: PaymentRecord, tx_hash: String) -> Self {
        Self { payment_id: record.id.clone(), tx_hash, record: Some(record) }
    }

    pub fn test_mode(payment_id: PaymentId, tx_hash: String) -> Self {
        Self { payment_id, tx_hash, record: None }
    }

    /// True when the id carried the temporary marker and nothing was persisted.
    pub fn is_test_mode(&self) -> bool {
        self.record.is_none()
    }
}
