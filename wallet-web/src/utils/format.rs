//! # Formatting Utilities for Wallet Web
//!
//! Number and value formatting utilities specific to the wallet-web application.
//! For address formatting, use [`shared::utils::format_address`] or [`shared::utils::truncate_address`].
//!
//! ## Functions
//!
//! - [`format_number`] - Format numbers with comma separators
//! - [`format_eth`] - Format an ETH amount with two decimals and the unit
//! - [`format_balance`] - Render a [`BalanceView`] for display

use shared::BalanceView;

use super::constants::CURRENCY;

/// Format a number with commas (e.g., 1234567.89 -> "1,234,567.89")
///
/// # Arguments
///
/// * `value` - The number to format
/// * `decimals` - Number of decimal places to show
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, dec),
        None => (formatted.as_str(), ""),
    };

    // Add commas to integer part
    let mut result = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };
    let integer_with_commas: String = result.chars().rev().collect();

    if decimal_part.is_empty() {
        format!("{}{}", sign, integer_with_commas)
    } else {
        format!("{}{}.{}", sign, integer_with_commas, decimal_part)
    }
}

/// Two decimals plus the unit, as the planners display results.
pub fn format_eth(value: f64) -> String {
    format!("{} {}", format_number(value, 2), CURRENCY)
}

/// Only fresh balances are shown as numbers.
pub fn format_balance(balance: &BalanceView) -> String {
    match balance {
        BalanceView::Fresh { value } => value.to_string(),
        BalanceView::Updating { last: Some(last) } => format!("updating… (was {})", last),
        BalanceView::Updating { last: None } => "updating…".to_string(),
        BalanceView::Unknown => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.89, 2), "1,234,567.89");
        assert_eq!(format_number(100.0, 2), "100.00");
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
    }

    #[test]
    fn test_format_eth() {
        assert_eq!(format_eth(1137.4283), "1,137.43 ETH");
    }

    #[test]
    fn test_format_balance_hides_stale_values() {
        assert_eq!(format_balance(&BalanceView::Fresh { value: 7 }), "7");
        assert_eq!(format_balance(&BalanceView::Updating { last: Some(7) }), "updating… (was 7)");
        assert_eq!(format_balance(&BalanceView::Unknown), "-");
    }
}
