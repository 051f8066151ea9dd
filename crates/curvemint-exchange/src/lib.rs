//! # curvemint-exchange
//!
//! **Price-time-priority order book engine for curvemint.**
//!
//! A single-pair limit order book with continuous matching, market sweeps
//! and liquidity probes. The engine has:
//!
//! - **Zero side effects**: no I/O, no persistence, no ambient clocks
//! - **Deterministic output**: same operation sequence -> same fills,
//!   same ticks, same ticker root on every replay
//! - **Midpoint execution**: crossed limit orders trade at the midpoint
//!   of the two resting prices; market sweeps pay each resting order's
//!   own price
//! - **Explicit settlement**: every execution is reported back to the
//!   driver as a [`curvemint_types::Fill`], never through callbacks

pub mod book;
pub mod determinism;
pub mod price_level;

pub use book::{OrderBook, PlaceReport, SweepReport};
pub use determinism::{compute_ticker_root, ticker_root_hex, verify_ticker_root};
pub use price_level::PriceLevel;
