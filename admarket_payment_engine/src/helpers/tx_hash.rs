//! # Transaction hash format check
//!
//! Verification of a crypto payment is a *format* check on the transaction identifier the shopper
//! claims, nothing more. A hash is accepted when it is at least [`MIN_TX_HASH_LENGTH`] characters
//! long and consists solely of hexadecimal characters (`0-9`, `a-f`, case-insensitive).
//!
//! There is deliberately no call to a blockchain node or explorer API to confirm that the
//! transaction exists, was mined, or moved the right amount to the right address. The status flip
//! that follows a passing check is trust-based. Treat this as a known correctness gap: a hardened
//! deployment would confirm the hash against a chain-indexing service before accepting it.

/// The shortest transaction identifier any supported network produces.
pub const MIN_TX_HASH_LENGTH: usize = 32;

/// Returns true if `hash` looks like a transaction identifier: all hex, and long enough.
pub fn is_valid_tx_hash(hash: &str) -> bool {
    hash.len() >= MIN_TX_HASH_LENGTH && hash.chars().all(|c| c.is_ascii_hexdigit())
}
