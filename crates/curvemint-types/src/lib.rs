//! # curvemint-types
//!
//! Shared types, errors, and configuration for the **curvemint** market
//! engines.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`OrderId`]
//! - **Order model**: [`Side`], [`NewOrder`], [`Order`], [`Fill`]
//! - **Trade log**: [`Tick`]
//! - **Configuration**: [`TokenConfig`], [`RedemptionPolicy`]
//! - **Errors**: [`CurvemintError`] with `CM_ERR_` prefix codes
//! - **Tolerance**: the shared near-equality helper for sqrt-crossing math

pub mod config;
pub mod error;
pub mod ids;
pub mod order;
pub mod tick;
pub mod tolerance;

// Re-export all primary types at crate root for ergonomic imports:
//   use curvemint_types::{Side, NewOrder, Tick, CurvemintError, ...};

pub use config::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use tick::*;
pub use tolerance::*;
