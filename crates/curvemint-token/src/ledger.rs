//! Token ownership ledger.
//!
//! Tracks per-account balances of the continuous token. All mutations are
//! atomic: either the full operation succeeds or the ledger is unchanged.
//! Total supply is always recomputed from the balances, never cached, so a
//! conservation check can compare it against what the token engine issued.

use std::collections::HashMap;

use curvemint_types::{AccountId, CurvemintError, Result};
use rust_decimal::Decimal;

/// Per-account token balances.
///
/// The ledger is the source of truth for who owns what. The token engine
/// calls into it on every create and destroy; drivers move tokens between
/// accounts with [`Ledger::transfer`].
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<AccountId, Decimal>,
}

impl Ledger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Mint `amount` tokens into `account`, creating it if needed.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if `amount` is negative.
    pub fn issue(&mut self, amount: Decimal, account: AccountId) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "issue amount",
                amount,
            });
        }
        *self.balances.entry(account).or_default() += amount;
        Ok(())
    }

    /// Burn `amount` tokens from `account`.
    ///
    /// # Errors
    /// Returns `InsufficientFunds` if the balance is smaller than `amount`
    /// (a missing account counts as zero). The balance is unchanged on
    /// failure.
    pub fn destroy(&mut self, amount: Decimal, account: AccountId) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "destroy amount",
                amount,
            });
        }
        let balance = self.balances.get_mut(&account).ok_or(
            CurvemintError::InsufficientFunds {
                account,
                balance: Decimal::ZERO,
                needed: amount,
            },
        )?;
        if *balance < amount {
            return Err(CurvemintError::InsufficientFunds {
                account,
                balance: *balance,
                needed: amount,
            });
        }
        *balance -= amount;
        Ok(())
    }

    /// Move `value` tokens from `from` to `to`, creating `to` if needed.
    ///
    /// # Errors
    /// Returns `InvalidAmount` if `value` is negative, `InsufficientFunds`
    /// if `from` cannot cover it. Nothing moves on failure.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, value: Decimal) -> Result<()> {
        if value < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "transfer value",
                amount: value,
            });
        }
        let balance = self.balances.get_mut(&from).ok_or(
            CurvemintError::InsufficientFunds {
                account: from,
                balance: Decimal::ZERO,
                needed: value,
            },
        )?;
        if *balance < value {
            return Err(CurvemintError::InsufficientFunds {
                account: from,
                balance: *balance,
                needed: value,
            });
        }
        *balance -= value;
        *self.balances.entry(to).or_default() += value;
        Ok(())
    }

    /// Balance of `account`; zero for accounts never touched.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Decimal {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Total token supply, recomputed as the sum of all balances.
    #[must_use]
    pub fn supply(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    /// Number of accounts the ledger has ever touched.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}
