//! # Hex Display Helpers
//!
//! Shortening of `0x`-prefixed values (account addresses, contract addresses,
//! transaction hashes) for the wallet page. The `0x` prefix is always kept and
//! digit counts exclude it, so `0xf39F...2266` shows four digits at each end
//! the way wallets usually render an account.
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let hash = "0x9fc76417374aa880d4449a1f7f31ec597f00b1f6f3dd2d66f4c9c6c445836d8b";
//! assert_eq!(format_address(hash, 6, 4), "0x9fc764...6d8b");
//! ```

const HEX_PREFIX: &str = "0x";

/// Keep `lead` digits after `0x` and the last `tail` digits.
///
/// Values too short to shorten, and non-ASCII input, come back unchanged.
/// Input without a `0x` prefix is shortened the same way, without one.
pub fn format_address(value: &str, lead: usize, tail: usize) -> String {
    if !value.is_ascii() {
        return value.to_string();
    }

    let (prefix, digits) = match value.strip_prefix(HEX_PREFIX) {
        Some(digits) => (HEX_PREFIX, digits),
        None => ("", value),
    };

    if digits.len() <= lead + tail {
        return value.to_string();
    }

    format!("{}{}...{}", prefix, &digits[..lead], &digits[digits.len() - tail..])
}

/// Account or hash in the 4+4 form used across the page.
pub fn truncate_address(value: &str) -> String {
    format_address(value, 4, 4)
}
