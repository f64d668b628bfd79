//! # Core Library
//!
//! Configuration, the error taxonomy and the pure planning calculators.
//! Nothing in here touches the chain; `lib-evm` builds the session and
//! transaction machinery on top of these types.

pub mod config;
pub mod error;
pub mod planner;

// Re-export commonly used types
pub use config::AtmConfig;
pub use error::{AtmError, Result, ValidationError};
pub use planner::{compute_monthly_savings, compute_return};
