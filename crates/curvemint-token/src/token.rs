//! The continuous token engine.
//!
//! Couples a [`PriceSupplyCurve`], an [`AuctionOverlay`], a [`Beneficiary`]
//! and a [`Ledger`] into one issuance machine. Buyers pay into the reserve
//! and receive curve-priced tokens (`create`); holders redeem tokens back
//! into reserve value (`destroy`). All supply figures are derived from the
//! reserve on every read; the only stored market state is the reserve value
//! and the ledger balances.
//!
//! During a launch auction the engine prices purchases as if a simulated
//! extra supply were already outstanding, which front-loads the price and
//! lets it decay toward the bare curve. Tokens "skipped" by premium
//! purchases never exist in the ledger but stay visible in the supply
//! arithmetic, keeping the reserve consistent with the curve at all times.

use rust_decimal::Decimal;

use curvemint_types::{
    almost_eq, AccountId, CurvemintError, RedemptionPolicy, Result, TokenConfig,
};

use crate::{AuctionOverlay, Beneficiary, Ledger, PriceSupplyCurve};

/// Curve-priced token issuer with a decaying launch auction.
#[derive(Debug, Clone)]
pub struct ContinuousToken {
    curve: PriceSupplyCurve,
    beneficiary: Beneficiary,
    auction: AuctionOverlay,
    ledger: Ledger,
    reserve_value: Decimal,
    redemption: RedemptionPolicy,
}

impl ContinuousToken {
    /// Builds a token with the default LINEAR redemption policy.
    #[must_use]
    pub fn new(curve: PriceSupplyCurve, beneficiary: Beneficiary, auction: AuctionOverlay) -> Self {
        Self::with_policy(curve, beneficiary, auction, RedemptionPolicy::Linear)
    }

    /// Builds a token with an explicit redemption policy.
    #[must_use]
    pub fn with_policy(
        curve: PriceSupplyCurve,
        beneficiary: Beneficiary,
        auction: AuctionOverlay,
        redemption: RedemptionPolicy,
    ) -> Self {
        Self {
            curve,
            beneficiary,
            auction,
            ledger: Ledger::new(),
            reserve_value: Decimal::ZERO,
            redemption,
        }
    }

    /// Builds a token from a validated [`TokenConfig`].
    pub fn from_config(config: &TokenConfig) -> Result<Self> {
        let curve = PriceSupplyCurve::new(config.curve_factor, config.base_price)?;
        let auction = AuctionOverlay::new(config.auction_factor, config.auction_time_const)?;
        let beneficiary = Beneficiary::new(config.beneficiary_account, config.beneficiary_fraction)?;
        Ok(Self::with_policy(curve, beneficiary, auction, config.redemption))
    }

    // =================================================================
    // Derived supplies (recomputed on every read, never stored)
    // =================================================================

    /// Supply the bare curve associates with the current reserve.
    pub fn notional_supply(&self) -> Result<Decimal> {
        self.curve.supply(self.reserve_value)
    }

    /// Curve supply that was paid for but never issued, because auction
    /// premiums moved more reserve per token than the bare curve price.
    /// Clamped at zero against last-digit representation dust.
    pub fn skipped_supply(&self) -> Result<Decimal> {
        Ok((self.notional_supply()? - self.ledger.supply()).max(Decimal::ZERO))
    }

    /// Phantom supply the auction prices purchases against. Zero once the
    /// surcharge has decayed below the curve base price.
    pub fn simulated_supply(&self) -> Result<Decimal> {
        let surcharge = self.auction.price_surcharge();
        if surcharge < self.curve.base_price() {
            return Ok(Decimal::ZERO);
        }
        let simulated = self.curve.supply_at_price(surcharge)? - self.skipped_supply()?;
        Ok(simulated.max(Decimal::ZERO))
    }

    /// The supply all pricing happens at: notional plus simulated.
    pub fn arithmetic_supply(&self) -> Result<Decimal> {
        Ok(self.notional_supply()? + self.simulated_supply()?)
    }

    /// True while the auction premium still prices purchases.
    pub fn is_auction(&self) -> Result<bool> {
        Ok(self.simulated_supply()? > Decimal::ZERO)
    }

    // =================================================================
    // Pricing
    // =================================================================

    /// Reserve value a buyer must pay to take `num` tokens home, including
    /// the beneficiary's cut (the gross issuance is `num / (1 - fraction)`).
    pub fn sale_cost(&self, num: Decimal) -> Result<Decimal> {
        if num < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "sale amount",
                amount: num,
            });
        }
        let added = num / (Decimal::ONE - self.beneficiary.fraction());
        self.curve.cost(self.arithmetic_supply()?, added)
    }

    /// Reserve value paid out for redeeming `num` tokens, priced by the
    /// configured [`RedemptionPolicy`].
    pub fn purchase_cost(&self, num: Decimal) -> Result<Decimal> {
        if num < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "redemption amount",
                amount: num,
            });
        }
        let supply = self.ledger.supply();
        if num > supply {
            return Err(CurvemintError::RedeemExceedsSupply {
                requested: num,
                supply,
            });
        }
        match self.redemption {
            RedemptionPolicy::Linear => {
                if num.is_zero() {
                    return Ok(Decimal::ZERO);
                }
                Ok(self.reserve_value * num / supply)
            }
            RedemptionPolicy::Curve => Ok(-self.curve.cost(self.arithmetic_supply()?, -num)?),
        }
    }

    /// Cost of buying one net token right now.
    pub fn ask(&self) -> Result<Decimal> {
        self.sale_cost(Decimal::ONE)
    }

    /// Payout for redeeming one token right now; zero on an empty reserve.
    pub fn bid(&self) -> Result<Decimal> {
        if self.reserve_value.is_zero() {
            return Ok(Decimal::ZERO);
        }
        self.purchase_cost(Decimal::ONE)
    }

    /// Marginal curve price without the auction overlay.
    pub fn curve_price(&self) -> Result<Decimal> {
        self.curve.cost(self.notional_supply()?, Decimal::ONE)
    }

    /// Marginal curve price at the auction-adjusted supply.
    pub fn curve_price_auction(&self) -> Result<Decimal> {
        self.curve.cost(self.arithmetic_supply()?, Decimal::ONE)
    }

    /// Issued supply valued at the current ask.
    pub fn mktcap(&self) -> Result<Decimal> {
        Ok(self.ask()? * self.ledger.supply())
    }

    /// Market cap net of the reserve backing it.
    pub fn valuation(&self) -> Result<Decimal> {
        Ok(self.mktcap()? - self.reserve_value)
    }

    /// Market cap if the issuable supply were sold out up to the current
    /// ask price.
    pub fn max_mktcap(&self) -> Result<Decimal> {
        let ask = self.ask()?;
        let vsupply = self.curve.supply_at_price(ask)? - self.skipped_supply()?;
        Ok(ask * vsupply)
    }

    /// The beneficiary's share of [`Self::max_mktcap`].
    pub fn max_valuation(&self) -> Result<Decimal> {
        Ok(self.max_mktcap()? * self.beneficiary.fraction())
    }

    // =================================================================
    // Mutations
    // =================================================================

    /// Pays `value` into the reserve and issues curve-priced tokens:
    /// `recipient` receives the sold share, the beneficiary the rest.
    /// Returns the amount sold to `recipient`.
    pub fn create(&mut self, value: Decimal, recipient: AccountId) -> Result<Decimal> {
        let supply = self.arithmetic_supply()?;
        let issued = self.curve.issued(supply, value)?;
        let sold = issued * (Decimal::ONE - self.beneficiary.fraction());
        let seigniorage = issued - sold;
        self.ledger.issue(sold, recipient)?;
        self.ledger.issue(seigniorage, self.beneficiary.account())?;
        self.reserve_value += value;
        tracing::debug!(
            value = %value,
            sold = %sold,
            seigniorage = %seigniorage,
            recipient = %recipient,
            reserve = %self.reserve_value,
            "tokens created"
        );
        Ok(sold)
    }

    /// Burns `num` of `owner`'s tokens and pays out of the reserve.
    /// The payout is priced before any state changes; if the burn fails
    /// the reserve is untouched. Returns the payout.
    pub fn destroy(&mut self, num: Decimal, owner: AccountId) -> Result<Decimal> {
        let mut value = self.purchase_cost(num)?;
        self.ledger.destroy(num, owner)?;
        if value > self.reserve_value {
            if !almost_eq(value, self.reserve_value) {
                tracing::warn!(
                    value = %value,
                    reserve = %self.reserve_value,
                    "redemption payout clamped to reserve"
                );
            }
            value = self.reserve_value;
        }
        self.reserve_value -= value;
        tracing::debug!(
            num = %num,
            value = %value,
            owner = %owner,
            reserve = %self.reserve_value,
            "tokens destroyed"
        );
        Ok(value)
    }

    /// Moves tokens between holders. The ledger stays engine-owned so
    /// issuance and redemption remain the only supply changes.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, value: Decimal) -> Result<()> {
        self.ledger.transfer(from, to, value)
    }

    /// Moves the auction's logical clock forward.
    pub fn advance_time(&mut self, seconds: u64) {
        self.auction.advance(seconds);
    }

    // =================================================================
    // Accessors
    // =================================================================

    #[must_use]
    pub fn reserve_value(&self) -> Decimal {
        self.reserve_value
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn curve(&self) -> &PriceSupplyCurve {
        &self.curve
    }

    #[must_use]
    pub fn auction(&self) -> &AuctionOverlay {
        &self.auction
    }

    #[must_use]
    pub fn beneficiary(&self) -> &Beneficiary {
        &self.beneficiary
    }

    #[must_use]
    pub fn redemption(&self) -> RedemptionPolicy {
        self.redemption
    }
}
