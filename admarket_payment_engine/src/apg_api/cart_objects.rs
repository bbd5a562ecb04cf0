//! The cart snapshot handed to checkout. The checkout flow reads the total and never mutates
//! the cart; mutation happens here, before a flow is started.

use apg_common::UsdAmount;
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartItemType {
    Product,
    Package,
}

/// One line in the cart. `id` identifies the line itself (for removal); `reference_id` points
/// at the catalog row it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub item_type: CartItemType,
    pub reference_id: String,
    pub name: String,
    pub details: String,
    pub price: UsdAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<String>,
}

/// The display label for an add-on token. Unknown tokens fall back to the token itself.
pub fn extra_label(token: &str) -> &str {
    match token {
        "top6" => "ТОП 6ч",
        "pin24" => "Закреп 24ч",
        "pin48" => "Закреп 48ч",
        "pin72" => "Закреп 72ч",
        other => other,
    }
}

impl CartItem {
    /// A product line. `extras` are the selected add-on tokens (`top6`, `pin24`, ...); their
    /// display labels are folded into the details string the way the storefront shows them.
    pub fn product<S: Into<String>>(
        reference_id: S,
        name: S,
        channel_name: S,
        extras: Vec<String>,
        price: UsdAmount,
    ) -> Self {
        let name = name.into();
        let details = if extras.is_empty() {
            name.clone()
        } else {
            let labels = extras.iter().map(|e| extra_label(e)).collect::<Vec<_>>().join(", ");
            format!("{name} + {labels}")
        };
        Self {
            id: Utc::now().timestamp_millis(),
            item_type: CartItemType::Product,
            reference_id: reference_id.into(),
            name,
            details,
            price,
            channel_name: Some(channel_name.into()),
            extras,
        }
    }

    /// A package line. Packages have a fixed price and no channel or extras.
    pub fn package<S: Into<String>>(reference_id: S, name: S, details: S, price: UsdAmount) -> Self {
        Self {
            id: Utc::now().timestamp_millis(),
            item_type: CartItemType::Package,
            reference_id: reference_id.into(),
            name: name.into(),
            details: details.into(),
            price,
            channel_name: None,
            extras: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mut item: CartItem) {
        // Millisecond line ids collide when items are added back to back.
        while self.items.iter().any(|i| i.id == item.id) {
            item.id += 1;
        }
        self.items.push(item);
    }

    /// Removes the line with the given id. Returns false if no such line exists.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> UsdAmount {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
