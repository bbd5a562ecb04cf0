use serde::{Deserialize, Serialize};

use crate::db_types::{OrderId, PaymentRecord};

/// Fired once for every payment record the engine flips to `completed`. The checkout
/// orchestrator subscribes to this to clear the cart and show its confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCompletedEvent {
    pub payment: PaymentRecord,
}

impl PaymentCompletedEvent {
    pub fn new(payment: PaymentRecord) -> Self {
        Self { payment }
    }
}

/// Fired when a shopper abandons the checkout before reaching the success step. The pending
/// record, if any, is left to lapse on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutCancelledEvent {
    pub order_id: OrderId,
}

impl CheckoutCancelledEvent {
    pub fn new(order_id: OrderId) -> Self {
        Self { order_id }
    }
}
