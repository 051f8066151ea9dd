//! A single price level in the order book.
//!
//! Orders at the same price are stored in FIFO order (time priority)
//! using a [`VecDeque`].

use std::collections::VecDeque;

use curvemint_types::{Order, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price level containing all orders resting at that price.
///
/// Orders are stored in arrival order (FIFO); the front of the deque has
/// the highest time priority and fills first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceLevel {
    /// The price at this level.
    pub price: Decimal,
    /// Orders in time-priority order (front = oldest = highest priority).
    pub orders: VecDeque<Order>,
}

impl PriceLevel {
    /// Create a new empty price level.
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
        }
    }

    /// Add an order to the back of this level (lowest time priority).
    pub fn push_back(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Remove and return the front (oldest / highest priority) order.
    pub fn pop_front(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// Peek at the front order without removing it.
    #[must_use]
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// Mutable access to the front order, for in-place fills.
    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Total remaining quantity across all orders at this level.
    #[must_use]
    pub fn total_quantity(&self) -> Decimal {
        self.orders.iter().map(|o| o.remaining).sum()
    }

    /// Remove a specific order by ID. Returns the removed order, or `None`.
    pub fn remove_order(&mut self, order_id: &OrderId) -> Option<Order> {
        let pos = self.orders.iter().position(|o| o.id == *order_id)?;
        self.orders.remove(pos)
    }

    /// Returns `true` if there are no orders at this level.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orders at this level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
