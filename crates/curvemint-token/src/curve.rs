//! The price-supply curve: closed-form linear bonding curve math.
//!
//! Price rises linearly with supply, `price(s) = base_price + factor * s`,
//! so the reserve backing a supply is the integral
//! `reserve(s) = base_price * s + factor/2 * s^2` and the supply for a given
//! reserve is the positive root of that quadratic. Everything here is pure:
//! the curve holds no state beyond its two parameters and every method is a
//! total function of its inputs (modulo domain preconditions).

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use curvemint_types::{CurvemintError, Result};

/// Linear price-supply curve, immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSupplyCurve {
    factor: Decimal,
    base_price: Decimal,
}

impl PriceSupplyCurve {
    /// Builds a curve with slope `factor` (> 0) and intercept `base_price`
    /// (>= 0).
    pub fn new(factor: Decimal, base_price: Decimal) -> Result<Self> {
        if factor <= Decimal::ZERO {
            return Err(CurvemintError::InvalidCurveFactor { factor });
        }
        if base_price < Decimal::ZERO {
            return Err(CurvemintError::InvalidBasePrice { base_price });
        }
        Ok(Self { factor, base_price })
    }

    #[must_use]
    pub fn factor(&self) -> Decimal {
        self.factor
    }

    #[must_use]
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    /// Marginal price at `supply`.
    pub fn price(&self, supply: Decimal) -> Result<Decimal> {
        check_non_negative("supply", supply)?;
        Ok(self.base_price + self.factor * supply)
    }

    /// Supply whose reserve is exactly `reserve`: the positive root of
    /// `factor/2 * s^2 + base_price * s - reserve = 0`.
    pub fn supply(&self, reserve: Decimal) -> Result<Decimal> {
        check_non_negative("reserve", reserve)?;
        let disc = self.base_price * self.base_price + Decimal::TWO * self.factor * reserve;
        let root = disc.sqrt().ok_or_else(|| {
            CurvemintError::Internal(format!("negative discriminant {disc} in supply inversion"))
        })?;
        Ok((root - self.base_price) / self.factor)
    }

    /// Supply at which the marginal price reaches `price`.
    pub fn supply_at_price(&self, price: Decimal) -> Result<Decimal> {
        if price < self.base_price {
            return Err(CurvemintError::PriceBelowBase {
                price,
                base_price: self.base_price,
            });
        }
        Ok((price - self.base_price) / self.factor)
    }

    /// Reserve backing `supply`: the integral of the price line.
    pub fn reserve(&self, supply: Decimal) -> Result<Decimal> {
        check_non_negative("supply", supply)?;
        Ok(self.base_price * supply + self.factor * supply * supply / Decimal::TWO)
    }

    /// Reserve at the supply where the marginal price reaches `price`.
    pub fn reserve_at_price(&self, price: Decimal) -> Result<Decimal> {
        check_non_negative("price", price)?;
        self.reserve(self.supply_at_price(price)?)
    }

    /// Reserve delta for moving the supply from `supply` to `supply + num`.
    /// `num` may be negative; the result is then the (negative) refund.
    pub fn cost(&self, supply: Decimal, num: Decimal) -> Result<Decimal> {
        check_non_negative("post-trade supply", supply + num)?;
        Ok(self.reserve(supply + num)? - self.reserve(supply)?)
    }

    /// Tokens issued by adding `value` to the reserve at `supply`.
    pub fn issued(&self, supply: Decimal, value: Decimal) -> Result<Decimal> {
        check_non_negative("value", value)?;
        let reserve = self.reserve(supply)?;
        Ok(self.supply(reserve + value)? - self.supply(reserve)?)
    }
}

fn check_non_negative(what: &'static str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(CurvemintError::InvalidAmount { what, amount });
    }
    Ok(())
}
