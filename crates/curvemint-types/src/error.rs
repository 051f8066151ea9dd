//! Error types for the curvemint engines.
//!
//! All errors use the `CM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Curve / numeric precondition errors
//! - 2xx: Ledger errors
//! - 3xx: Token errors
//! - 4xx: Exchange errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, OrderId};

/// Central error enum for all curvemint operations.
#[derive(Debug, Error)]
pub enum CurvemintError {
    // =================================================================
    // Curve / Numeric Precondition Errors (1xx)
    // =================================================================
    /// The curve slope must be strictly positive.
    #[error("CM_ERR_100: Invalid curve factor: {factor} (must be > 0)")]
    InvalidCurveFactor { factor: Decimal },

    /// The curve base price must be non-negative.
    #[error("CM_ERR_101: Invalid base price: {base_price} (must be >= 0)")]
    InvalidBasePrice { base_price: Decimal },

    /// A price below the curve's base has no supply preimage.
    #[error("CM_ERR_102: Price {price} is below the curve base price {base_price}")]
    PriceBelowBase {
        price: Decimal,
        base_price: Decimal,
    },

    /// A quantity violated its domain precondition (negative supply,
    /// negative value, non-positive market amount, ...).
    #[error("CM_ERR_103: Invalid {what}: {amount}")]
    InvalidAmount { what: &'static str, amount: Decimal },

    // =================================================================
    // Ledger Errors (2xx)
    // =================================================================
    /// Not enough balance in the account to perform the operation.
    #[error("CM_ERR_200: Insufficient funds in {account}: need {needed}, have {balance}")]
    InsufficientFunds {
        account: AccountId,
        balance: Decimal,
        needed: Decimal,
    },

    // =================================================================
    // Token Errors (3xx)
    // =================================================================
    /// The beneficiary fraction must lie in `[0, 1)`.
    #[error("CM_ERR_300: Invalid beneficiary fraction: {fraction} (must be in [0, 1))")]
    InvalidFraction { fraction: Decimal },

    /// The auction time constant must be strictly positive.
    #[error("CM_ERR_301: Invalid auction time constant: {time_const} (must be > 0)")]
    InvalidTimeConst { time_const: Decimal },

    /// The auction factor must be non-negative.
    #[error("CM_ERR_302: Invalid auction factor: {factor} (must be >= 0)")]
    InvalidAuctionFactor { factor: Decimal },

    /// A redemption asked for more tokens than have ever been issued.
    #[error("CM_ERR_303: Redemption of {requested} exceeds token supply {supply}")]
    RedeemExceedsSupply {
        requested: Decimal,
        supply: Decimal,
    },

    // =================================================================
    // Exchange Errors (4xx)
    // =================================================================
    /// The book cannot satisfy the request (empty side, or not enough
    /// liquidity for an all-or-nothing probe). Probing strategies are
    /// expected to catch this routinely.
    #[error("CM_ERR_400: Not available")]
    NotAvailable,

    /// The requested order is not resting in the book.
    #[error("CM_ERR_401: Order not found: {0}")]
    OrderNotFound(OrderId),

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error (numeric state that should be
    /// unreachable). Indicates an implementation bug.
    #[error("CM_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, CurvemintError>;
