//! Trade-log entries produced by the curvemint order book.
//!
//! A [`Tick`] is the immutable record of one trade: continuous matching
//! appends one per crossed pair, market sweeps one per resting order
//! consumed. The ordered tick log is the book's full execution history and
//! the input to the determinism root.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One entry in the book's trade log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Executed amount in base units.
    pub amount: Decimal,
    /// Execution price.
    pub price: Decimal,
    /// The book's logical clock at execution time.
    pub time: u64,
}

impl Tick {
    /// Quote value moved by this trade.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.amount * self.price
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tick[t={}] {} @ {}", self.time, self.amount, self.price)
    }
}
