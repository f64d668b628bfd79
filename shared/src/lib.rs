//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the ATM core (`lib-evm`) and the
//! presentation layer (`wallet-web`). Everything the page renders comes from the
//! types in here, and every request the page builds from its forms is one of them.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::planner`]**: Calculator requests and results
//!   - **[`dto::session`]**: Read-only projection of session, balance and transactions
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Shorten `0x` addresses and hashes for display
//!   - **[`utils::truncate_address`]**: The 4+4 form used by the page
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using `serde`:
//! - Field names use **snake_case**
//! - Optional fields are omitted from JSON when `None`
//! - Status enums serialize to lowercase strings
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::planner::InvestmentType;
//! use shared::utils::truncate_address;
//!
//! let kind: InvestmentType = "Mutual Funds".parse().unwrap();
//! assert_eq!(kind, InvestmentType::MutualFunds);
//!
//! let display = truncate_address("0x5FbDB2315678afecb367f032d93F642f64180aa3");
//! assert_eq!(display, "0x5FbD...0aa3");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use utils::*;
