//! Price-time-priority order book with continuous matching.
//!
//! Uses `BTreeMap` for price-level ordering:
//! - **Bids** (buys): `BTreeMap<Reverse<Decimal>, PriceLevel>` -- highest price first
//! - **Asks** (sells): `BTreeMap<Decimal, PriceLevel>` -- lowest price first
//!
//! An auxiliary `HashMap<OrderId, (Side, Price)>` enables O(log N)
//! cancellation. Continuous matching runs after every [`OrderBook::place`]
//! and executes crossed orders at the **midpoint** of the two resting
//! prices; market sweeps instead execute at each resting order's own price.
//! Every trade appends one [`Tick`] to the book's trade log, stamped with
//! the caller-advanced logical clock.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use curvemint_types::{
    CurvemintError, Fill, NewOrder, Order, OrderId, Result, Side, Tick,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::price_level::PriceLevel;

/// Outcome of placing a limit order: the identity the book assigned to it
/// plus every fill the placement triggered (both counterparties of each
/// trade, in execution order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceReport {
    pub order_id: OrderId,
    pub fills: Vec<Fill>,
}

/// Outcome of a market sweep. `cost` is the total quote value exchanged:
/// cash paid for a buy sweep, cash received for a sell sweep. `filled` is
/// how much of the requested amount actually executed; the rest found no
/// liquidity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub filled: Decimal,
    pub cost: Decimal,
    pub fills: Vec<Fill>,
}

/// A price-time-priority order book for a single token pair.
#[derive(Debug)]
pub struct OrderBook {
    /// Buy side: highest price first (`Reverse` key).
    bids: BTreeMap<Reverse<Decimal>, PriceLevel>,
    /// Sell side: lowest price first.
    asks: BTreeMap<Decimal, PriceLevel>,
    /// Fast lookup: `OrderId -> (side, price)` for O(log N) cancel.
    index: HashMap<OrderId, (Side, Decimal)>,
    /// Append-only trade log, oldest first.
    ticker: Vec<Tick>,
    /// Logical clock stamped on ticks. Advanced only by `update_time`.
    time: u64,
    /// Next order identity, assigned in insertion order.
    next_id: OrderId,
}

impl OrderBook {
    /// Create a new empty order book.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::new(),
            ticker: Vec::new(),
            time: 0,
            next_id: OrderId(1),
        }
    }

    // =================================================================
    // Clock
    // =================================================================

    /// Set the logical clock stamped on subsequent ticks. The book never
    /// reads an ambient clock; drivers advance time explicitly.
    pub fn update_time(&mut self, time: u64) {
        self.time = time;
    }

    // =================================================================
    // Placement & continuous matching
    // =================================================================

    /// Place a limit order and run continuous matching.
    ///
    /// The order is assigned the next sequential [`OrderId`], inserted at
    /// the back of its price level, and matched against the opposite side
    /// while the book crosses. Crossed orders trade at the midpoint of the
    /// two resting prices. Zero-amount orders are legal; they clear on the
    /// next matching pass without trading.
    pub fn place(&mut self, order: NewOrder) -> Result<PlaceReport> {
        if order.price < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "price",
                amount: order.price,
            });
        }
        if order.amount < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "amount",
                amount: order.amount,
            });
        }

        let id = self.next_id;
        self.next_id = id.next();

        let resting = Order {
            id,
            side: order.side,
            price: order.price,
            quantity: order.amount,
            remaining: order.amount,
        };
        self.index.insert(id, (order.side, order.price));

        let price = order.price;
        match order.side {
            Side::Buy => {
                self.bids
                    .entry(Reverse(price))
                    .or_insert_with(|| PriceLevel::new(price))
                    .push_back(resting);
            }
            Side::Sell => {
                self.asks
                    .entry(price)
                    .or_insert_with(|| PriceLevel::new(price))
                    .push_back(resting);
            }
        }

        let fills = self.match_crossing();
        debug!(
            order = %id,
            side = %order.side,
            price = %order.price,
            amount = %order.amount,
            fills = fills.len(),
            "order placed"
        );
        Ok(PlaceReport {
            order_id: id,
            fills,
        })
    }

    /// Match the front orders of the best bid and ask levels while the
    /// book crosses (`best_bid >= best_ask`).
    ///
    /// Each iteration trades `min` of the two remaining amounts at the
    /// midpoint of the two resting prices, emits one [`Fill`] per
    /// counterparty and one [`Tick`], and removes whichever order(s)
    /// filled completely. At least one order leaves the book per
    /// iteration, so the loop terminates.
    fn match_crossing(&mut self) -> Vec<Fill> {
        let mut fills = Vec::new();

        loop {
            let Some(mut bid_entry) = self.bids.first_entry() else {
                break;
            };
            let Some(mut ask_entry) = self.asks.first_entry() else {
                break;
            };

            let bid_price = bid_entry.get().price;
            let ask_price = ask_entry.get().price;
            if bid_price < ask_price {
                break;
            }
            let trade_price = (bid_price + ask_price) / Decimal::TWO;

            let Some(buy) = bid_entry.get_mut().front_mut() else {
                bid_entry.remove();
                continue;
            };
            let Some(sell) = ask_entry.get_mut().front_mut() else {
                ask_entry.remove();
                continue;
            };

            let amount = buy.remaining.min(sell.remaining);
            buy.remaining -= amount;
            sell.remaining -= amount;

            let buy_id = buy.id;
            let buy_left = buy.remaining;
            let buy_done = buy.is_filled();
            let sell_id = sell.id;
            let sell_left = sell.remaining;
            let sell_done = sell.is_filled();

            if amount > Decimal::ZERO {
                fills.push(Fill {
                    order_id: buy_id,
                    side: Side::Buy,
                    price: trade_price,
                    amount,
                    remaining: buy_left,
                });
                fills.push(Fill {
                    order_id: sell_id,
                    side: Side::Sell,
                    price: trade_price,
                    amount,
                    remaining: sell_left,
                });
                self.ticker.push(Tick {
                    amount,
                    price: trade_price,
                    time: self.time,
                });
                debug!(
                    amount = %amount,
                    price = %trade_price,
                    buy = %buy_id,
                    sell = %sell_id,
                    "crossed orders matched"
                );
            }

            if buy_done {
                bid_entry.get_mut().pop_front();
                self.index.remove(&buy_id);
            }
            if bid_entry.get().is_empty() {
                bid_entry.remove();
            }
            if sell_done {
                ask_entry.get_mut().pop_front();
                self.index.remove(&sell_id);
            }
            if ask_entry.get().is_empty() {
                ask_entry.remove();
            }
        }

        fills
    }

    // =================================================================
    // Cancellation
    // =================================================================

    /// Cancel a resting order by ID. Returns the removed order with its
    /// unfilled `remaining`.
    pub fn cancel(&mut self, order_id: &OrderId) -> Result<Order> {
        let (side, price) = self
            .index
            .remove(order_id)
            .ok_or(CurvemintError::OrderNotFound(*order_id))?;

        let order = match side {
            Side::Buy => {
                let level = self
                    .bids
                    .get_mut(&Reverse(price))
                    .ok_or(CurvemintError::OrderNotFound(*order_id))?;
                let order = level
                    .remove_order(order_id)
                    .ok_or(CurvemintError::OrderNotFound(*order_id))?;
                if level.is_empty() {
                    self.bids.remove(&Reverse(price));
                }
                order
            }
            Side::Sell => {
                let level = self
                    .asks
                    .get_mut(&price)
                    .ok_or(CurvemintError::OrderNotFound(*order_id))?;
                let order = level
                    .remove_order(order_id)
                    .ok_or(CurvemintError::OrderNotFound(*order_id))?;
                if level.is_empty() {
                    self.asks.remove(&price);
                }
                order
            }
        };

        debug!(order = %order_id, side = %side, price = %price, "order cancelled");
        Ok(order)
    }

    // =================================================================
    // Market sweeps
    // =================================================================

    /// Buy `amount` at market: consume the ask side best-price-first.
    ///
    /// Each resting order executes **at its own price** (not the midpoint),
    /// so a sweep pays the sum of the resting prices it crosses. Fills
    /// whatever liquidity exists; `filled < amount` means the ask side ran
    /// dry.
    pub fn buy_market(&mut self, amount: Decimal) -> Result<SweepReport> {
        if amount <= Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "amount",
                amount,
            });
        }

        let mut needed = amount;
        let mut cost = Decimal::ZERO;
        let mut fills = Vec::new();

        while needed > Decimal::ZERO {
            let Some(mut entry) = self.asks.first_entry() else {
                break;
            };
            let Some(front) = entry.get_mut().front_mut() else {
                entry.remove();
                continue;
            };

            let take = needed.min(front.remaining);
            front.remaining -= take;
            needed -= take;

            let id = front.id;
            let price = front.price;
            let left = front.remaining;
            let done = front.is_filled();

            if take > Decimal::ZERO {
                cost += take * price;
                fills.push(Fill {
                    order_id: id,
                    side: Side::Sell,
                    price,
                    amount: take,
                    remaining: left,
                });
                self.ticker.push(Tick {
                    amount: take,
                    price,
                    time: self.time,
                });
            }

            if done {
                entry.get_mut().pop_front();
                self.index.remove(&id);
            }
            if entry.get().is_empty() {
                entry.remove();
            }
        }

        let filled = amount - needed;
        debug!(amount = %amount, filled = %filled, cost = %cost, "market buy swept the ask side");
        Ok(SweepReport {
            filled,
            cost,
            fills,
        })
    }

    /// Sell `amount` at market: consume the bid side best-price-first.
    ///
    /// The mirror of [`OrderBook::buy_market`]; `cost` is the cash
    /// received for the amount sold.
    pub fn sell_market(&mut self, amount: Decimal) -> Result<SweepReport> {
        if amount <= Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "amount",
                amount,
            });
        }

        let mut needed = amount;
        let mut cost = Decimal::ZERO;
        let mut fills = Vec::new();

        while needed > Decimal::ZERO {
            let Some(mut entry) = self.bids.first_entry() else {
                break;
            };
            let Some(front) = entry.get_mut().front_mut() else {
                entry.remove();
                continue;
            };

            let take = needed.min(front.remaining);
            front.remaining -= take;
            needed -= take;

            let id = front.id;
            let price = front.price;
            let left = front.remaining;
            let done = front.is_filled();

            if take > Decimal::ZERO {
                cost += take * price;
                fills.push(Fill {
                    order_id: id,
                    side: Side::Buy,
                    price,
                    amount: take,
                    remaining: left,
                });
                self.ticker.push(Tick {
                    amount: take,
                    price,
                    time: self.time,
                });
            }

            if done {
                entry.get_mut().pop_front();
                self.index.remove(&id);
            }
            if entry.get().is_empty() {
                entry.remove();
            }
        }

        let filled = amount - needed;
        debug!(amount = %amount, filled = %filled, proceeds = %cost, "market sell swept the bid side");
        Ok(SweepReport {
            filled,
            cost,
            fills,
        })
    }

    // =================================================================
    // Liquidity probes (zero mutation)
    // =================================================================

    /// Cost of buying `amount` at market, without executing. Walks the ask
    /// side exactly as [`OrderBook::buy_market`] would and returns the cash
    /// the sweep would pay for the liquidity it finds.
    pub fn buy_cost(&self, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "amount",
                amount,
            });
        }

        let mut needed = amount;
        let mut cost = Decimal::ZERO;
        for level in self.asks.values() {
            if needed.is_zero() {
                break;
            }
            for order in &level.orders {
                if needed.is_zero() {
                    break;
                }
                let take = needed.min(order.remaining);
                cost += take * order.price;
                needed -= take;
            }
        }
        Ok(cost)
    }

    /// Proceeds of selling `amount` at market, without executing. The
    /// dry-run twin of [`OrderBook::sell_market`].
    pub fn sell_cost(&self, amount: Decimal) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "amount",
                amount,
            });
        }

        let mut needed = amount;
        let mut proceeds = Decimal::ZERO;
        for level in self.bids.values() {
            if needed.is_zero() {
                break;
            }
            for order in &level.orders {
                if needed.is_zero() {
                    break;
                }
                let take = needed.min(order.remaining);
                proceeds += take * order.price;
                needed -= take;
            }
        }
        Ok(proceeds)
    }

    /// How much could be bought with `cash`, and the cash left over.
    ///
    /// Walks the ask side best-first. Whole orders are costed exactly at
    /// `remaining * price`; the first order the cash cannot cover in full
    /// is taken partially (`cash / price`) and exhausts the cash. With
    /// `partial == false` the probe demands the book absorb all the cash
    /// and fails with `NotAvailable` when any is left over.
    pub fn buyable(&self, cash: Decimal, partial: bool) -> Result<(Decimal, Decimal)> {
        if cash < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "cash",
                amount: cash,
            });
        }

        let mut left = cash;
        let mut amount = Decimal::ZERO;
        for level in self.asks.values() {
            if left.is_zero() {
                break;
            }
            for order in &level.orders {
                if left.is_zero() {
                    break;
                }
                if order.price.is_zero() {
                    // Free liquidity consumes no cash.
                    amount += order.remaining;
                    continue;
                }
                let full = order.remaining * order.price;
                if full <= left {
                    amount += order.remaining;
                    left -= full;
                } else {
                    amount += left / order.price;
                    left = Decimal::ZERO;
                }
            }
        }

        if !left.is_zero() && !partial {
            return Err(CurvemintError::NotAvailable);
        }
        Ok((amount, left))
    }

    /// How much of `amount` could be sold into the bid side, and the
    /// proceeds. With `partial == false` the probe demands the book absorb
    /// the full amount and fails with `NotAvailable` otherwise.
    pub fn sellable(&self, amount: Decimal, partial: bool) -> Result<(Decimal, Decimal)> {
        if amount < Decimal::ZERO {
            return Err(CurvemintError::InvalidAmount {
                what: "amount",
                amount,
            });
        }

        let mut needed = amount;
        let mut proceeds = Decimal::ZERO;
        for level in self.bids.values() {
            if needed.is_zero() {
                break;
            }
            for order in &level.orders {
                if needed.is_zero() {
                    break;
                }
                let take = needed.min(order.remaining);
                proceeds += take * order.price;
                needed -= take;
            }
        }

        if !needed.is_zero() && !partial {
            return Err(CurvemintError::NotAvailable);
        }
        Ok((amount - needed, proceeds))
    }

    // =================================================================
    // Quotes
    // =================================================================

    /// Best (highest) bid price. `NotAvailable` if no bids.
    pub fn bid(&self) -> Result<Decimal> {
        self.bids
            .keys()
            .next()
            .map(|r| r.0)
            .ok_or(CurvemintError::NotAvailable)
    }

    /// Best (lowest) ask price. `NotAvailable` if no asks.
    pub fn ask(&self) -> Result<Decimal> {
        self.asks
            .keys()
            .next()
            .copied()
            .ok_or(CurvemintError::NotAvailable)
    }

    /// Spread = best ask - best bid. `NotAvailable` if either side is empty.
    pub fn spread(&self) -> Result<Decimal> {
        Ok(self.ask()? - self.bid()?)
    }

    /// Mid price = (best bid + best ask) / 2. `NotAvailable` if either side
    /// is empty.
    pub fn mid(&self) -> Result<Decimal> {
        Ok((self.bid()? + self.ask()?) / Decimal::TWO)
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The trade log, oldest first.
    #[must_use]
    pub fn ticker(&self) -> &[Tick] {
        &self.ticker
    }

    /// Current logical clock.
    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Total number of orders currently in the book.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    /// Number of distinct bid price levels.
    #[must_use]
    pub fn bid_depth(&self) -> usize {
        self.bids.len()
    }

    /// Number of distinct ask price levels.
    #[must_use]
    pub fn ask_depth(&self) -> usize {
        self.asks.len()
    }

    /// Returns `true` if the book has no orders on either side.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Check if an order is resting in the book.
    #[must_use]
    pub fn contains_order(&self, order_id: &OrderId) -> bool {
        self.index.contains_key(order_id)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}
