//! The catalog rows the storefront renders: channels, the ad products sold on them, and the
//! fixed-price packages. These are plain data carriers shared by the store queries, the fixture
//! set and the JSON endpoints.

use apg_common::UsdAmount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ChannelType {
    Channel,
    Chat,
}

/// A place ads can be bought on. `subscribers` drives the pricing of the generated fixture
/// products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Channel {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub username: Option<String>,
    pub subscribers: i64,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    pub is_active: bool,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProductKind {
    Post,
    Pin,
    Subscription,
    Branding,
    Native,
}

/// One purchasable placement on a channel. The extra prices are per-product; a zero price means
/// the extra is not offered for that product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: String,
    pub channel_id: String,
    pub name: String,
    pub product_type: ProductKind,
    pub base_price: UsdAmount,
    pub top_6h_price: UsdAmount,
    pub pin_24h_price: UsdAmount,
    pub pin_48h_price: UsdAmount,
    pub is_active: bool,
}

/// A fixed-price bundle of posts sold independently of any channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: UsdAmount,
    pub posts_count: i64,
    pub includes_help: bool,
    pub includes_stats: bool,
    pub includes_guarantee: bool,
    pub bonus_posts: i64,
    pub discount_percent: i64,
    pub is_popular: bool,
    pub is_active: bool,
}
