//! Beneficiary policy: who receives seigniorage, and how much of it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use curvemint_types::{AccountId, CurvemintError, Result};

/// Seigniorage recipient. `fraction` of every issuance is diverted to
/// `account`, which is an ordinary ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    account: AccountId,
    fraction: Decimal,
}

impl Beneficiary {
    /// Builds a beneficiary taking `fraction` in `[0, 1)` of issuance.
    /// A fraction of 1 would leave buyers with nothing, so it is excluded.
    pub fn new(account: AccountId, fraction: Decimal) -> Result<Self> {
        if fraction < Decimal::ZERO || fraction >= Decimal::ONE {
            return Err(CurvemintError::InvalidFraction { fraction });
        }
        Ok(Self { account, fraction })
    }

    /// A beneficiary that takes nothing (fraction 0).
    pub fn none(account: AccountId) -> Self {
        Self {
            account,
            fraction: Decimal::ZERO,
        }
    }

    #[must_use]
    pub fn account(&self) -> AccountId {
        self.account
    }

    #[must_use]
    pub fn fraction(&self) -> Decimal {
        self.fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_fraction_in_range() {
        let b = Beneficiary::new(AccountId(0), Decimal::new(3, 1)).unwrap();
        assert_eq!(b.fraction(), Decimal::new(3, 1));
        assert_eq!(b.account(), AccountId(0));
    }

    #[test]
    fn rejects_unit_and_negative_fractions() {
        assert!(matches!(
            Beneficiary::new(AccountId(0), Decimal::ONE),
            Err(CurvemintError::InvalidFraction { .. })
        ));
        assert!(matches!(
            Beneficiary::new(AccountId(0), Decimal::NEGATIVE_ONE),
            Err(CurvemintError::InvalidFraction { .. })
        ));
    }

    #[test]
    fn none_takes_nothing() {
        assert_eq!(Beneficiary::none(AccountId(9)).fraction(), Decimal::ZERO);
    }
}
