//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged between the ATM core and the page.
//!
//! ## Module Organization
//!
//! - [`planner`] - Savings planner and return estimator requests/results
//! - [`session`] - Session status, balance view, pending transaction and memo views
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Status enums**: Serialize to lowercase strings using `#[serde(rename_all = "lowercase")]`
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "status": "connected",
//!   "account": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
//!   "balance": { "state": "fresh", "value": 2 },
//!   "estimate": {
//!     "investment_type": "MutualFunds",
//!     "projected_value": 1137.43,
//!     "rate_percent": 13.0,
//!     "periods": 12,
//!     "compounding": "monthly"
//!   }
//! }
//! ```

pub mod planner;
pub mod session;

pub use planner::*;
pub use session::*;
