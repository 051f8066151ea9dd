//! Dutch-auction price overlay.
//!
//! A hyperbolically decaying surcharge on top of the curve price:
//! `factor / (elapsed + time_const)`. The overlay owns its elapsed clock and
//! moves it only when the driver calls [`AuctionOverlay::advance`]; nothing
//! here reads wall-clock time, so replays are exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use curvemint_types::{CurvemintError, Result};

/// Decaying launch-price overlay. `factor == 0` disables it permanently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionOverlay {
    factor: Decimal,
    time_const: Decimal,
    elapsed: u64,
}

impl AuctionOverlay {
    /// Builds an overlay with surcharge numerator `factor` (>= 0) and decay
    /// constant `time_const` (> 0) seconds.
    pub fn new(factor: Decimal, time_const: Decimal) -> Result<Self> {
        if factor < Decimal::ZERO {
            return Err(CurvemintError::InvalidAuctionFactor { factor });
        }
        if time_const <= Decimal::ZERO {
            return Err(CurvemintError::InvalidTimeConst { time_const });
        }
        Ok(Self {
            factor,
            time_const,
            elapsed: 0,
        })
    }

    /// An overlay that never charges a premium.
    pub fn disabled() -> Self {
        Self {
            factor: Decimal::ZERO,
            time_const: Decimal::ONE,
            elapsed: 0,
        }
    }

    #[must_use]
    pub fn factor(&self) -> Decimal {
        self.factor
    }

    #[must_use]
    pub fn time_const(&self) -> Decimal {
        self.time_const
    }

    /// Seconds of logical time this overlay has seen.
    #[must_use]
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Moves the logical clock forward. Saturates instead of wrapping so a
    /// runaway driver cannot rewind the decay.
    pub fn advance(&mut self, seconds: u64) {
        self.elapsed = self.elapsed.saturating_add(seconds);
    }

    /// Current surcharge over the curve price, strictly decreasing in
    /// elapsed time and approaching zero.
    #[must_use]
    pub fn price_surcharge(&self) -> Decimal {
        self.factor / (Decimal::from(self.elapsed) + self.time_const)
    }
}
