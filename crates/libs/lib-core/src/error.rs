//! # Centralized Error Handling
//!
//! This module defines the client-wide error type [`AtmError`] and the pure
//! input-rejection type [`ValidationError`]. Both follow the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Session** - wallet provider and connection issues
//!    - [`ProviderUnavailable`](AtmError::ProviderUnavailable): fatal for the page, no retry
//!    - [`ConnectionDenied`](AtmError::ConnectionDenied): user-correctable, connect again
//!    - [`NotConnected`](AtmError::NotConnected): an intent that needs a session ran without one
//!
//! 2. **Chain** - contract reads and transactions
//!    - [`ContractCall`](AtmError::ContractCall): surfaced, balance left stale, no retry
//!    - [`OperationInProgress`](AtmError::OperationInProgress): fast-fail guard, one transaction at a time
//!    - [`MemoFailure`](AtmError::MemoFailure): logged, never fails the calculator that asked for it
//!
//! 3. **Input** - [`Validation`](AtmError::Validation), rejected before any chain interaction
//!
//! 4. **Startup** - [`Config`](AtmError::Config)
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AtmError, Result, ValidationError};
//! use shared::InvestmentType;
//!
//! fn require_rate(rate: Option<f64>) -> Result<f64> {
//!     rate.ok_or_else(|| AtmError::Validation(ValidationError::MissingRate(InvestmentType::Gold)))
//! }
//!
//! assert!(require_rate(None).is_err());
//! ```

use shared::InvestmentType;
use thiserror::Error;

/// Convenience type alias for `Result<T, AtmError>`.
pub type Result<T> = std::result::Result<T, AtmError>;

/// Calculator input rejections.
///
/// These never trigger side effects: a request that fails validation never
/// reaches the chain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("target date is required")]
    MissingTargetDate,

    #[error("investment goal must be greater than zero")]
    NonPositiveGoal,

    #[error("current balance cannot be negative")]
    NegativeBalance,

    #[error("the target date must be in the future")]
    TargetDateNotInFuture,

    /// Target date falls inside the current ~30-day window, so there is
    /// not a single whole month to spread the savings over.
    #[error("target date is less than one month away ({days:.1} days)")]
    DegenerateInterval { days: f64 },

    #[error("an interest rate is required for {0}")]
    MissingRate(InvestmentType),

    #[error("invalid investment type: {0}")]
    InvalidInvestmentType(String),

    #[error("investment amount cannot be negative")]
    NegativeAmount,
}

/// Client-wide error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AtmError {
    /// No injected wallet provider; the user has to install or enable one.
    #[error("Wallet provider unavailable")]
    ProviderUnavailable,

    /// The provider returned no accounts or refused the request.
    #[error("Connection denied: {0}")]
    ConnectionDenied(String),

    /// Contract read or transaction failure (RPC error, revert, rejected signature).
    #[error("Contract call error: {0}")]
    ContractCall(String),

    /// A mutating transaction (or connection request) is already outstanding.
    #[error("Another operation is still in progress")]
    OperationInProgress,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Memo transaction failed. Reported, never propagated as a calculator failure.
    #[error("Memo failure: {0}")]
    MemoFailure(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AtmError {
    /// Stable identifier for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            AtmError::ProviderUnavailable => "ProviderUnavailable",
            AtmError::ConnectionDenied(_) => "ConnectionDenied",
            AtmError::ContractCall(_) => "ContractCallError",
            AtmError::OperationInProgress => "OperationInProgress",
            AtmError::Validation(ValidationError::DegenerateInterval { .. }) => "DegenerateInterval",
            AtmError::Validation(ValidationError::MissingRate(_)) => "MissingRate",
            AtmError::Validation(ValidationError::InvalidInvestmentType(_)) => "InvalidInvestmentType",
            AtmError::Validation(_) => "ValidationError",
            AtmError::MemoFailure(_) => "MemoFailure",
            AtmError::NotConnected => "NotConnected",
            AtmError::Config(_) => "Config",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AtmError::ProviderUnavailable => {
                "Please install MetaMask in order to use this ATM.".to_string()
            }
            AtmError::ConnectionDenied(_) => {
                "Wallet connection was not approved. Please connect your wallet again.".to_string()
            }
            AtmError::ContractCall(msg) => format!("Transaction failed: {}", msg),
            AtmError::OperationInProgress => {
                "Please wait for the pending transaction to finish.".to_string()
            }
            AtmError::Validation(err) => {
                let msg = err.to_string();
                let mut chars = msg.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            AtmError::MemoFailure(msg) => format!("Result could not be recorded on-chain: {}", msg),
            AtmError::NotConnected => "Please connect your MetaMask wallet".to_string(),
            AtmError::Config(_) => "An internal error occurred".to_string(),
        }
    }
}
