//! # curvemint-token
//!
//! **Continuous-token issuance engine for curvemint.**
//!
//! Couples a linear price-supply curve, a decaying launch-auction overlay,
//! a seigniorage beneficiary and a token ledger into [`ContinuousToken`].
//! The engine has:
//!
//! - **Zero side effects**: no I/O, no persistence, no ambient clocks
//! - **Deterministic output**: same operation sequence -> same state
//! - **Derived supplies**: every supply figure is recomputed from the
//!   reserve on read; only the reserve and the ledger are stored
//! - **Atomic failures**: a failed create or destroy leaves no trace

pub mod auction;
pub mod beneficiary;
pub mod curve;
pub mod ledger;
pub mod token;

pub use auction::AuctionOverlay;
pub use beneficiary::Beneficiary;
pub use curve::PriceSupplyCurve;
pub use ledger::Ledger;
pub use token::ContinuousToken;
