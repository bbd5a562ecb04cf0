mod ids;
mod tx_hash;

pub use ids::random_base36;
pub use tx_hash::{is_valid_tx_hash, MIN_TX_HASH_LENGTH};
