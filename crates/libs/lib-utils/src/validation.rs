//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a `0x`-prefixed, 20-byte hex account or contract address.
///
/// Checksum casing is not verified.
pub fn validate_hex_address(value: &str, field_name: &str) -> Result<(), String> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| format!("{} must start with 0x", field_name))?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("{} must be 40 hex characters after 0x", field_name));
    }
    Ok(())
}

/// Validate that a number is finite and not negative.
pub fn validate_non_negative(value: f64, field_name: &str) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        Err(format!("{} must be a non-negative number", field_name))
    } else {
        Ok(())
    }
}
