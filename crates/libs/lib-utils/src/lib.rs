//! # Utilities Library
//!
//! Shared utility functions for hex encoding, environment variables, time, and validation.

pub mod envs;
pub mod hex0x;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use hex0x::{hex0x_decode, hex0x_encode};
pub use time::{date_start_utc, parse_date};
pub use validation::{validate_hex_address, validate_non_negative, validate_not_empty};
