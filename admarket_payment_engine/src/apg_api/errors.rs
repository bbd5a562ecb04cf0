use thiserror::Error;

use crate::traits::PaymentStoreError;

/// Failure taxonomy of the verification decision procedure.
///
/// The display strings double as the user-facing failure messages of the verification contract,
/// so the shopper-facing ones are written in the storefront's language. Callers surface them
/// verbatim next to the retry affordance; they must never be replaced with internal error text.
#[derive(Debug, Clone, Error)]
pub enum PaymentVerificationError {
    /// The request did not carry both a payment id and a transaction hash.
    #[error("Missing paymentId or txHash")]
    MissingFields,
    /// The claimed hash is shorter than 32 characters or contains a non-hex character.
    #[error("Невірний формат TX Hash")]
    InvalidHashFormat,
    /// No record with the supplied id exists, and the id does not carry the temporary marker.
    #[error("Платіж не знайдено")]
    PaymentNotFound,
    /// The payment window lapsed before verification. Terminal for this record; the shopper must
    /// start a new payment.
    #[error("Термін дії платежу закінчився")]
    PaymentExpired,
    /// The accepting write failed. The claimed hash may be valid; the shopper can resubmit.
    #[error("Помилка оновлення статусу платежу")]
    StorageError(#[from] PaymentStoreError),
}

/// An illegal action was requested on the checkout state machine, e.g. submitting a transaction
/// hash while still at the currency menu.
#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("The '{action}' action is not available in the '{state}' step")]
    InvalidTransition { state: &'static str, action: &'static str },
}
