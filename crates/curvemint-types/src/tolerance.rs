//! The one shared near-equality helper.
//!
//! Curve inversions cross a square root, so quantities that are equal on
//! paper can differ in the last digits. Every comparison that tolerates
//! this goes through here: relative when both operands are positive,
//! absolute otherwise.

use rust_decimal::Decimal;

/// Default comparison tolerance: 1e-4, relative where applicable.
#[must_use]
pub fn default_tolerance() -> Decimal {
    Decimal::new(1, 4)
}

/// `almost_eq_within` at the default tolerance.
#[must_use]
pub fn almost_eq(a: Decimal, b: Decimal) -> bool {
    almost_eq_within(a, b, default_tolerance())
}

/// Near-equality: relative to `min(a, b)` when that is positive, absolute
/// otherwise. Comparison is multiplied out so no operand range can
/// overflow a division.
#[must_use]
pub fn almost_eq_within(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    let diff = (a - b).abs();
    let floor = a.min(b);
    if floor > Decimal::ZERO {
        diff < tolerance * floor
    } else {
        diff < tolerance
    }
}
