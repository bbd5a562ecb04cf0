use std::{fmt::Display, str::FromStr};

use apg_common::UsdAmount;
use chrono::{DateTime, Duration, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

use crate::{currencies::CryptoCurrency, helpers::random_base36};

/// Prefix for identifiers of payment attempts that could not be persisted. Records carrying this
/// prefix only exist in the checkout session that created them.
pub const TEMP_PAYMENT_PREFIX: &str = "temp_";

/// Prefix for persisted crypto payment record keys.
pub const PAYMENT_ID_PREFIX: &str = "cp_";

/// How long a shopper has to settle a crypto payment before it lapses.
pub const DEFAULT_PAYMENT_WINDOW_HOURS: i64 = 24;

//--------------------------------------      PaymentId       --------------------------------------------------------

/// The key of a crypto payment record. Either a persisted database key, or a locally generated
/// `temp_` token when the backing store was unreachable at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct PaymentId(pub String);

impl PaymentId {
    /// Generates a fresh key for a record that is about to be persisted.
    pub fn fresh() -> Self {
        Self(format!("{PAYMENT_ID_PREFIX}{:016x}", rand::random::<u64>()))
    }

    /// Generates an unpersisted fallback token, marked with the [`TEMP_PAYMENT_PREFIX`].
    pub fn temporary() -> Self {
        Self(format!("{TEMP_PAYMENT_PREFIX}{}", Utc::now().timestamp_millis()))
    }

    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_PAYMENT_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PaymentId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for PaymentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PaymentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------       OrderId        --------------------------------------------------------

/// A lightweight wrapper around the storefront order identifier a payment belongs to. The engine
/// never validates it; it exists to correlate payment records with carts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Generates an order id in the storefront's `order_<millis>_<suffix>` shape.
    pub fn generate() -> Self {
        Self(format!("order_{}_{}", Utc::now().timestamp_millis(), random_base36(6)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------    PaymentStatus     --------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// The record has been created and the shopper has been shown payment instructions.
    Pending,
    /// The shopper has claimed a transaction hash which has not been accepted yet.
    Verifying,
    /// The claimed hash passed verification. Terminal.
    Completed,
    /// The payment window lapsed before verification. Terminal.
    Expired,
}

impl PaymentStatus {
    /// Whether the record may still move to `completed` or `expired`.
    pub fn is_live(&self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Verifying)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_live()
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Verifying => write!(f, "verifying"),
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Expired => write!(f, "expired"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ConversionError(pub String);

impl FromStr for PaymentStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "verifying" => Ok(Self::Verifying),
            "completed" => Ok(Self::Completed),
            "expired" => Ok(Self::Expired),
            s => Err(ConversionError(format!("Invalid payment status: {s}"))),
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid payment status: {value}. But this conversion cannot fail. Defaulting to pending");
            PaymentStatus::Pending
        })
    }
}

//--------------------------------------    PaymentRecord     --------------------------------------------------------

/// One crypto payment attempt, as stored in the `crypto_payments` table.
///
/// `amount_usd` and `wallet_address` are fixed at creation time and never recomputed. `status`
/// only ever moves forward; see [`crate::traits::PaymentStore`] for the transition rules.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount_usd: UsdAmount,
    pub crypto_currency: CryptoCurrency,
    pub wallet_address: String,
    pub status: PaymentStatus,
    pub tx_hash_provided: Option<String>,
    pub tx_hash_verified: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    /// Whether the payment window has lapsed. This is the lazy expiry check; callers that see
    /// `true` on a live record are expected to persist the `expired` status.
    pub fn has_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_temporary(&self) -> bool {
        self.id.is_temporary()
    }

    /// Builds the in-memory stand-in for a record that could not be persisted. It carries a
    /// `temp_` key and behaves like a pending record for the rest of the checkout session.
    pub fn unpersisted(payment: &NewPaymentRecord) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentId::temporary(),
            order_id: payment.order_id.clone(),
            amount_usd: payment.amount_usd,
            crypto_currency: payment.crypto_currency,
            wallet_address: payment.wallet_address.clone(),
            status: PaymentStatus::Pending,
            tx_hash_provided: None,
            tx_hash_verified: None,
            created_at: now,
            updated_at: now,
            expires_at: payment.expires_at,
            verified_at: None,
        }
    }
}

//--------------------------------------   NewPaymentRecord   --------------------------------------------------------

/// The information needed to open a new crypto payment attempt. The record key, timestamps and
/// initial `pending` status are assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentRecord {
    /// The storefront order this payment settles.
    pub order_id: OrderId,
    /// The cart total at the time the shopper entered the crypto flow.
    pub amount_usd: UsdAmount,
    /// The currency option the shopper picked.
    pub crypto_currency: CryptoCurrency,
    /// The destination address, copied from the static currency configuration.
    pub wallet_address: String,
    /// Deadline after which the payment lapses.
    pub expires_at: DateTime<Utc>,
}

impl NewPaymentRecord {
    pub fn new(order_id: OrderId, amount_usd: UsdAmount, currency: CryptoCurrency) -> Self {
        Self {
            order_id,
            amount_usd,
            crypto_currency: currency,
            wallet_address: currency.wallet_address().to_string(),
            expires_at: Utc::now() + Duration::hours(DEFAULT_PAYMENT_WINDOW_HOURS),
        }
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }
}
