use std::fmt::{Debug, Display};

use apg_common::UsdAmount;
use chrono::{Duration, Utc};
use log::*;

use crate::{
    currencies::{qr_code_url, CryptoCurrency, CurrencyOption, CURRENCY_OPTIONS},
    db_types::{NewPaymentRecord, OrderId, PaymentRecord, PaymentStatus, DEFAULT_PAYMENT_WINDOW_HOURS},
    events::EventProducers,
    traits::PaymentStore,
    CheckoutError,
    PaymentFlowApi,
};

//--------------------------------------    CheckoutState     --------------------------------------------------------

/// The step a checkout session is on. From `payment` onwards the session carries the payment
/// record it is settling; for unpersisted records this in-memory copy is the only one there is.
#[derive(Debug, Clone)]
pub enum CheckoutState {
    /// The shopper is looking at the currency menu.
    Select,
    /// The shopper has been shown the wallet address, amount and QR code.
    Payment { payment: PaymentRecord },
    /// The shopper pressed "I have paid" and is entering a transaction hash.
    Verify { payment: PaymentRecord },
    /// Terminal. The payment verified successfully.
    Success { payment: PaymentRecord },
}

impl CheckoutState {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Select => "select",
            CheckoutState::Payment { .. } => "payment",
            CheckoutState::Verify { .. } => "verify",
            CheckoutState::Success { .. } => "success",
        }
    }

    pub fn payment(&self) -> Option<&PaymentRecord> {
        match self {
            CheckoutState::Select => None,
            CheckoutState::Payment { payment } |
            CheckoutState::Verify { payment } |
            CheckoutState::Success { payment } => Some(payment),
        }
    }
}

impl Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

//--------------------------------------     CheckoutFlow     --------------------------------------------------------

/// One shopper's walk through the crypto checkout: `select → payment → verify → success`.
///
/// The flow owns an injected store handle (via [`PaymentFlowApi`]) and the cart total that was
/// authoritative when the shopper entered the flow. All persistence is best-effort in the
/// direction of availability: a store outage at the `select` step falls back to a temporary
/// record rather than blocking the shopper, and a failed claim write never prevents the
/// verification call. The verification result is the actual gate.
pub struct CheckoutFlow<B> {
    api: PaymentFlowApi<B>,
    order_id: OrderId,
    amount: UsdAmount,
    payment_window: Duration,
    state: CheckoutState,
    last_error: Option<String>,
}

impl<B> Debug for CheckoutFlow<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutFlow[{}, {}]", self.order_id, self.state)
    }
}

impl<B> CheckoutFlow<B> {
    pub fn new(db: B, producers: EventProducers, order_id: OrderId, amount: UsdAmount) -> Self {
        Self {
            api: PaymentFlowApi::new(db, producers),
            order_id,
            amount,
            payment_window: Duration::hours(DEFAULT_PAYMENT_WINDOW_HOURS),
            state: CheckoutState::Select,
            last_error: None,
        }
    }

    pub fn with_payment_window(mut self, window: Duration) -> Self {
        self.payment_window = window;
        self
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn amount(&self) -> UsdAmount {
        self.amount
    }

    /// The recoverable error message to show next to the action that failed, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The fixed menu shown at the `select` step.
    pub fn currency_menu(&self) -> &'static [CurrencyOption] {
        &CURRENCY_OPTIONS
    }

    /// The scannable-code image URL for the current payment's wallet address.
    pub fn qr_code_url(&self) -> Option<String> {
        self.state.payment().map(|p| qr_code_url(&p.wallet_address))
    }
}

impl<B> CheckoutFlow<B>
where B: PaymentStore
{
    /// Exit from `select`: open a pending record for the chosen currency and advance to
    /// `payment`.
    ///
    /// If the store cannot persist the record, the flow does not block the shopper: it
    /// synthesizes a temporary id and proceeds with an in-memory record. The error is logged and
    /// the shopper sees nothing.
    pub async fn choose_currency(&mut self, currency: CryptoCurrency) -> Result<&CheckoutState, CheckoutError> {
        if !matches!(self.state, CheckoutState::Select) {
            return Err(CheckoutError::InvalidTransition { state: self.state.name(), action: "choose_currency" });
        }
        let new_payment = NewPaymentRecord::new(self.order_id.clone(), self.amount, currency)
            .with_expires_at(Utc::now() + self.payment_window);
        let payment = match self.api.create_payment(new_payment.clone()).await {
            Ok(record) => record,
            Err(e) => {
                warn!(
                    "🛒️ Could not persist a payment record for order {} ({e}). Falling back to a temporary id.",
                    self.order_id
                );
                PaymentRecord::unpersisted(&new_payment)
            },
        };
        debug!("🛒️ Order {} moved to the payment step with payment [{}]", self.order_id, payment.id);
        self.last_error = None;
        self.state = CheckoutState::Payment { payment };
        Ok(&self.state)
    }

    /// Exit from `payment`: the shopper says they have sent the funds.
    pub fn confirm_paid(&mut self) -> Result<&CheckoutState, CheckoutError> {
        match std::mem::replace(&mut self.state, CheckoutState::Select) {
            CheckoutState::Payment { payment } => {
                self.last_error = None;
                self.state = CheckoutState::Verify { payment };
                Ok(&self.state)
            },
            other => {
                let err = CheckoutError::InvalidTransition { state: other.name(), action: "confirm_paid" };
                self.state = other;
                Err(err)
            },
        }
    }

    /// Secondary exit from `payment`: back to the currency menu. The chosen currency is
    /// forgotten; any persisted record is left to lapse on its own.
    pub fn choose_other_method(&mut self) -> Result<&CheckoutState, CheckoutError> {
        match std::mem::replace(&mut self.state, CheckoutState::Select) {
            CheckoutState::Payment { payment } => {
                debug!("🛒️ Order {} returned to the currency menu. Payment [{}] is abandoned.", self.order_id, payment.id);
                self.last_error = None;
                Ok(&self.state)
            },
            other => {
                let err = CheckoutError::InvalidTransition { state: other.name(), action: "choose_other_method" };
                self.state = other;
                Err(err)
            },
        }
    }

    /// Secondary exit from `verify`: back to the payment instructions.
    pub fn back_to_payment(&mut self) -> Result<&CheckoutState, CheckoutError> {
        match std::mem::replace(&mut self.state, CheckoutState::Select) {
            CheckoutState::Verify { payment } => {
                self.last_error = None;
                self.state = CheckoutState::Payment { payment };
                Ok(&self.state)
            },
            other => {
                let err = CheckoutError::InvalidTransition { state: other.name(), action: "back_to_payment" };
                self.state = other;
                Err(err)
            },
        }
    }

    /// Exit from `verify`: check the claimed transaction hash.
    ///
    /// Empty input is rejected locally without a round trip. The claimed hash is recorded
    /// best-effort, then handed to the verification decision procedure. On success the flow
    /// reaches `success`; on failure it stays on `verify` with [`Self::last_error`] set to the
    /// message the shopper should see, and the claim can be corrected and resubmitted.
    pub async fn submit_hash(&mut self, tx_hash: &str) -> Result<&CheckoutState, CheckoutError> {
        let mut payment = match &self.state {
            CheckoutState::Verify { payment } => payment.clone(),
            other => return Err(CheckoutError::InvalidTransition { state: other.name(), action: "submit_hash" }),
        };
        let tx_hash = tx_hash.trim();
        if tx_hash.is_empty() {
            self.last_error = Some("Введіть TX Hash".to_string());
            return Ok(&self.state);
        }
        if !payment.id.is_temporary() {
            match self.api.claim_tx_hash(&payment.id, tx_hash).await {
                Ok(Some(updated)) => payment = updated,
                Ok(None) => {},
                Err(e) => warn!(
                    "🛒️ Could not record the claimed hash for payment [{}]: {e}. Continuing to verification.",
                    payment.id
                ),
            }
        }
        match self.api.verify_payment(payment.id.as_str(), tx_hash).await {
            Ok(verified) => {
                let completed = match verified.record {
                    Some(record) => record,
                    None => {
                        // The record only exists in this session, so complete the local copy and
                        // notify subscribers ourselves.
                        payment.status = PaymentStatus::Completed;
                        payment.tx_hash_provided = Some(tx_hash.to_string());
                        payment.tx_hash_verified = Some(tx_hash.to_string());
                        payment.verified_at = Some(Utc::now());
                        self.api.call_payment_completed_hook(&payment).await;
                        payment
                    },
                };
                info!("🛒️ Order {} reached the success step ({})", self.order_id, completed.amount_usd);
                self.last_error = None;
                self.state = CheckoutState::Success { payment: completed };
                Ok(&self.state)
            },
            Err(e) => {
                debug!("🛒️ Verification attempt for order {} failed: {e}", self.order_id);
                self.last_error = Some(e.to_string());
                self.state = CheckoutState::Verify { payment };
                Ok(&self.state)
            },
        }
    }

    /// The shopper abandoned the flow before completing payment. Fires the cancelled signal so
    /// the orchestrator can navigate away; nothing is rolled back.
    pub async fn cancel(&self) {
        if matches!(self.state, CheckoutState::Success { .. }) {
            warn!("🛒️ Ignoring cancel for order {}: the checkout already succeeded", self.order_id);
            return;
        }
        self.api.cancel_checkout(&self.order_id).await;
    }

    pub fn api(&self) -> &PaymentFlowApi<B> {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut PaymentFlowApi<B> {
        &mut self.api
    }
}
