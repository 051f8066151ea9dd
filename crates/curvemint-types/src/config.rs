//! Configuration types for the curvemint token engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, CurvemintError, Result};

/// How `destroy` prices a redemption.
///
/// Chosen at construction and fixed for the token's life; switching
/// mid-life would change the meaning of the reserve retroactively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedemptionPolicy {
    /// Pay out the current reserve-per-token average. Price-path neutral.
    #[default]
    Linear,
    /// Walk the curve back down from the arithmetic supply. Sensitive to
    /// auction premium still in the arithmetic supply.
    Curve,
}

impl std::fmt::Display for RedemptionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linear => write!(f, "LINEAR"),
            Self::Curve => write!(f, "CURVE"),
        }
    }
}

/// Full parameter set for a continuous token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Curve slope; price rises by this much per unit of supply.
    pub curve_factor: Decimal,
    /// Price of the first token on the bare curve.
    pub base_price: Decimal,
    /// Auction surcharge numerator. Zero disables the auction overlay.
    pub auction_factor: Decimal,
    /// Auction decay time constant in seconds.
    pub auction_time_const: Decimal,
    /// Ledger account receiving seigniorage.
    pub beneficiary_account: AccountId,
    /// Fraction of every issuance diverted to the beneficiary.
    pub beneficiary_fraction: Decimal,
    /// Redemption pricing policy.
    pub redemption: RedemptionPolicy,
}

impl TokenConfig {
    /// Checks every parameter range without building an engine.
    pub fn validate(&self) -> Result<()> {
        if self.curve_factor <= Decimal::ZERO {
            return Err(CurvemintError::InvalidCurveFactor {
                factor: self.curve_factor,
            });
        }
        if self.base_price < Decimal::ZERO {
            return Err(CurvemintError::InvalidBasePrice {
                base_price: self.base_price,
            });
        }
        if self.auction_factor < Decimal::ZERO {
            return Err(CurvemintError::InvalidAuctionFactor {
                factor: self.auction_factor,
            });
        }
        if self.auction_time_const <= Decimal::ZERO {
            return Err(CurvemintError::InvalidTimeConst {
                time_const: self.auction_time_const,
            });
        }
        if self.beneficiary_fraction < Decimal::ZERO || self.beneficiary_fraction >= Decimal::ONE {
            return Err(CurvemintError::InvalidFraction {
                fraction: self.beneficiary_fraction,
            });
        }
        Ok(())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            curve_factor: Decimal::new(1, 4),         // 0.0001
            base_price: Decimal::new(5, 0),           // 5
            auction_factor: Decimal::new(1_000_000, 0),
            auction_time_const: Decimal::new(1_000, 0),
            beneficiary_account: AccountId(0),
            beneficiary_fraction: Decimal::new(3, 1), // 0.3
            redemption: RedemptionPolicy::Linear,
        }
    }
}
