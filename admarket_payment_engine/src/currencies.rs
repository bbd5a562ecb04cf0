//! Static configuration for the crypto currencies the storefront accepts.
//!
//! Every option maps to a single fixed destination wallet. Addresses are not generated
//! per-payment, so the paid amount is the only signal that distinguishes two shoppers paying into
//! the same wallet.
use std::{fmt::Display, str::FromStr};

use log::error;
use serde::{Deserialize, Serialize};
use sqlx::Type;

use crate::db_types::ConversionError;

//--------------------------------------   CryptoCurrency     --------------------------------------------------------

/// The fixed menu of currency+network combinations offered at the `select` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CryptoCurrency {
    UsdtTrc20,
    Btc,
}

impl CryptoCurrency {
    pub fn option(&self) -> &'static CurrencyOption {
        match self {
            CryptoCurrency::UsdtTrc20 => &USDT_TRC20,
            CryptoCurrency::Btc => &BTC,
        }
    }

    /// The fixed destination wallet for this currency.
    pub fn wallet_address(&self) -> &'static str {
        self.option().address
    }
}

impl Display for CryptoCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CryptoCurrency::UsdtTrc20 => write!(f, "USDT_TRC20"),
            CryptoCurrency::Btc => write!(f, "BTC"),
        }
    }
}

impl FromStr for CryptoCurrency {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USDT_TRC20" => Ok(Self::UsdtTrc20),
            "BTC" => Ok(Self::Btc),
            s => Err(ConversionError(format!("Unknown crypto currency: {s}"))),
        }
    }
}

impl From<String> for CryptoCurrency {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Unknown crypto currency: {value}. But this conversion cannot fail. Defaulting to USDT_TRC20");
            CryptoCurrency::UsdtTrc20
        })
    }
}

//--------------------------------------   CurrencyOption     --------------------------------------------------------

/// One entry of the currency menu, as presented to the shopper.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyOption {
    pub id: CryptoCurrency,
    pub name: &'static str,
    pub network: &'static str,
    pub icon: &'static str,
    pub address: &'static str,
    pub min_deposit: &'static str,
    pub processing_time: &'static str,
}

pub const USDT_TRC20: CurrencyOption = CurrencyOption {
    id: CryptoCurrency::UsdtTrc20,
    name: "USDT",
    network: "Tron (TRC-20)",
    icon: "💎",
    address: "TA6cwUPYLBg76bUVFwBmHdmU7J8PCLBmpK",
    min_deposit: "5 USDT",
    processing_time: "~1 хв",
};

pub const BTC: CurrencyOption = CurrencyOption {
    id: CryptoCurrency::Btc,
    name: "Bitcoin",
    network: "Bitcoin Network",
    icon: "₿",
    address: "34maYP8LaEYLL4axS8mheRavMLisjtJC7J",
    min_deposit: "0.0001 BTC",
    processing_time: "~45 хв",
};

pub static CURRENCY_OPTIONS: [CurrencyOption; 2] = [USDT_TRC20, BTC];

/// The scannable-code image for a destination address, rendered by a third-party service.
/// Addresses are base58/hex strings, so no URL escaping is required.
pub fn qr_code_url(address: &str) -> String {
    format!("https://api.qrserver.com/v1/create-qr-code/?size=200x200&data={address}")
}
