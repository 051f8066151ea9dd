//! Order types for the curvemint order book.
//!
//! Drivers submit a [`NewOrder`]; the book assigns the [`OrderId`] and keeps
//! an [`Order`] resting until it is filled or cancelled. Executions against a
//! resting order are reported back to the driver as [`Fill`] values, never
//! through callbacks, so orders stay plain serializable data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::OrderId;

/// Which side of the book an order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side a fill at this side's order consumes liquidity from.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// A limit order as submitted by a driver, before the book has assigned an
/// identity to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
}

impl NewOrder {
    #[must_use]
    pub fn buy(price: Decimal, amount: Decimal) -> Self {
        Self {
            side: Side::Buy,
            price,
            amount,
        }
    }

    #[must_use]
    pub fn sell(price: Decimal, amount: Decimal) -> Self {
        Self {
            side: Side::Sell,
            price,
            amount,
        }
    }
}

/// A resting order in the book.
///
/// `quantity` is the amount the order was submitted with and never changes;
/// `remaining` decreases as the order fills. The `(price, quantity)` pair
/// always reflects the order as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    pub remaining: Decimal,
}

impl Order {
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.remaining.is_zero()
    }

    #[must_use]
    pub fn filled(&self) -> Decimal {
        self.quantity - self.remaining
    }

    #[must_use]
    pub fn fill_ratio(&self) -> Decimal {
        if self.quantity.is_zero() {
            Decimal::ZERO
        } else {
            self.filled() / self.quantity
        }
    }
}

/// One execution against a resting order.
///
/// `remaining` is the resting order's quantity left after this fill; zero
/// means the order was completely consumed and has left the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
    pub remaining: Decimal,
}

impl std::fmt::Display for Fill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} x {} @ {} ({} left)",
            self.side, self.order_id, self.amount, self.price, self.remaining
        )
    }
}
