//! Determinism verification utilities for the trade log.
//!
//! Two books fed the same operation sequence must produce the exact same
//! tick log. The ticker root is a hash over the ordered log that enables
//! quick comparison without shipping full payloads.

use curvemint_types::Tick;
use sha2::{Digest, Sha256};

/// Compute the root hash over an ordered tick log.
///
/// The hash is domain-separated and length-prefixed, and covers each
/// tick's amount, price, and logical timestamp. The same ticks in the
/// same order always produce the same root.
#[must_use]
pub fn compute_ticker_root(ticks: &[Tick]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"curvemint:ticker_root:v1:");
    hasher.update((ticks.len() as u64).to_le_bytes());

    for tick in ticks {
        // Decimal::to_string is canonical for a given scale, and both
        // amount and price come out of identical arithmetic on replay.
        hasher.update(tick.amount.to_string().as_bytes());
        hasher.update(tick.price.to_string().as_bytes());
        hasher.update(tick.time.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Verify that a tick log matches an expected root.
#[must_use]
pub fn verify_ticker_root(ticks: &[Tick], expected_root: &[u8; 32]) -> bool {
    let actual = compute_ticker_root(ticks);
    actual == *expected_root
}

/// The ticker root as lowercase hex, for logs and cross-process
/// comparison.
#[must_use]
pub fn ticker_root_hex(ticks: &[Tick]) -> String {
    hex::encode(compute_ticker_root(ticks))
}
