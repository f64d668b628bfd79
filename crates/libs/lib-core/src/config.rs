//! # Application Configuration
//!
//! This module manages the ATM client configuration. Values come from environment
//! variables when they exist (native builds and tests) and fall back to defaults
//! matching a local Hardhat deployment of the ATM contract otherwise (the browser
//! build has no process environment).
//!
//! | Variable               | Default                                      |
//! |------------------------|----------------------------------------------|
//! | `ATM_CONTRACT_ADDRESS` | `0x5FbDB2315678afecb367f032d93F642f64180aa3` |
//! | `ATM_FIXED_AMOUNT`     | `1`                                          |
//! | `ATM_MEMO_VALUE_WEI`   | `1000000000000000` (0.001 ETH)               |
//! | `ATM_ABI_JSON`         | embedded ATM contract ABI                    |
//!
//! All configuration is validated on load to fail fast if misconfigured.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let contract = &config.contract_address;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].
//! Components never read the global themselves; the startup code hands a clone
//! to `AtmClient`, so tests can build their own [`AtmConfig`].

use std::sync::OnceLock;

use lib_utils::{get_env_or, get_env_parse_or, validate_hex_address};

/// Address the ATM contract gets on a fresh local Hardhat node.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Quantity moved by a single deposit or withdraw.
pub const DEFAULT_FIXED_AMOUNT: u64 = 1;

/// Value attached to memo transactions: 0.001 ETH.
pub const DEFAULT_MEMO_VALUE_WEI: u128 = 1_000_000_000_000_000;

/// ATM client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtmConfig {
    /// Address of the deployed ATM contract
    pub contract_address: String,

    /// Amount passed to every `deposit` / `withdraw` call
    ///
    /// The page offers fixed "Deposit 1" / "Withdraw 1" buttons; this is that 1.
    pub fixed_amount: u64,

    /// Wei attached to each memo transaction
    pub memo_value_wei: u128,

    /// ABI descriptor override (Hardhat artifact JSON or bare ABI array)
    ///
    /// `None` uses the ABI embedded in `lib-evm`.
    pub abi_json: Option<String>,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            fixed_amount: DEFAULT_FIXED_AMOUNT,
            memo_value_wei: DEFAULT_MEMO_VALUE_WEI,
            abi_json: None,
        }
    }
}

impl AtmConfig {
    /// Load configuration from environment variables, using defaults for unset ones.
    pub fn from_env() -> Result<Self, String> {
        let contract_address = get_env_or("ATM_CONTRACT_ADDRESS", DEFAULT_CONTRACT_ADDRESS);

        let fixed_amount = get_env_parse_or("ATM_FIXED_AMOUNT", DEFAULT_FIXED_AMOUNT)
            .map_err(|e| format!("ATM_FIXED_AMOUNT must be a valid number: {}", e))?;

        let memo_value_wei = get_env_parse_or("ATM_MEMO_VALUE_WEI", DEFAULT_MEMO_VALUE_WEI)
            .map_err(|e| format!("ATM_MEMO_VALUE_WEI must be a valid number: {}", e))?;

        let abi_json = lib_utils::get_env("ATM_ABI_JSON").ok();

        Ok(Self {
            contract_address,
            fixed_amount,
            memo_value_wei,
            abi_json,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        validate_hex_address(&self.contract_address, "ATM_CONTRACT_ADDRESS")?;

        if self.fixed_amount == 0 {
            return Err("ATM_FIXED_AMOUNT must be greater than 0".to_string());
        }

        if let Some(abi) = &self.abi_json {
            lib_utils::validate_not_empty(abi, "ATM_ABI_JSON")?;
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<AtmConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are set but invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<(), String> {
    let config = AtmConfig::from_env()?;
    config.validate()?;

    tracing::debug!(
        contract = %config.contract_address,
        fixed_amount = config.fixed_amount,
        "ATM configuration loaded"
    );

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static AtmConfig {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}

/// Get the global configuration, if [`init_config()`] succeeded.
pub fn try_core_config() -> Option<&'static AtmConfig> {
    CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AtmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fixed_amount, 1);
        assert_eq!(config.memo_value_wei, 1_000_000_000_000_000);
    }

    #[test]
    fn test_rejects_bad_address() {
        let config = AtmConfig {
            contract_address: "not-an-address".to_string(),
            ..AtmConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_amount() {
        let config = AtmConfig {
            fixed_amount: 0,
            ..AtmConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err("ATM_FIXED_AMOUNT must be greater than 0".to_string())
        );
    }
}
