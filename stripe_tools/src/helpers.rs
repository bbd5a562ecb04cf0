use log::*;
use regex::Regex;

use crate::data_objects::{CheckoutItem, CheckoutLine, CheckoutOptions};

/// Catalog references are v4 UUIDs. Anything else never reaches the checkout webhook.
pub fn is_valid_uuid(id: &str) -> bool {
    let re = Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap();
    re.is_match(id)
}

/// Turns a raw cart line into a wire item, or drops it.
///
/// Package deals and anything else without a catalog UUID are filtered out here. The add-on
/// tokens collapse into boolean option flags, so a duplicated or unknown token cannot inflate
/// the order.
pub fn sanitize_line(line: &CheckoutLine) -> Option<CheckoutItem> {
    if !is_valid_uuid(&line.reference_id) {
        debug!("Dropping a cart line with an invalid catalog reference: {:?}", line.reference_id);
        return None;
    }
    let picked = |token: &str| line.extras.iter().any(|e| e == token);
    let options = CheckoutOptions {
        top_6h: picked("top6"),
        pin_24h: picked("pin24"),
        pin_48h: picked("pin48"),
        pin_72h: picked("pin72"),
    };
    Some(CheckoutItem { product_id: line.reference_id.clone(), options })
}
