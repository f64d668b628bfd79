//! Application constants

/// Interval between `eth_getTransactionReceipt` polls
pub const RECEIPT_POLL_INTERVAL_MS: u32 = 1_000;

/// How often the page republishes the client view while an intent runs
pub const VIEW_REFRESH_MS: u32 = 250;

/// Unit shown next to planner amounts
pub const CURRENCY: &str = "ETH";
