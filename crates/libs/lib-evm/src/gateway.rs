//! # Provider Gateway
//!
//! Detects the injected wallet provider once, at startup, and hands it out to
//! the session.

use std::rc::Rc;

use lib_core::AtmError;
use tracing::{info, warn};

use crate::provider::WalletProvider;

pub struct ProviderGateway {
    provider: Option<Rc<dyn WalletProvider>>,
}

impl ProviderGateway {
    /// Wrap the result of provider detection.
    ///
    /// `None` means no wallet is injected; every operation that needs one will
    /// fail with [`AtmError::ProviderUnavailable`].
    pub fn detect(provider: Option<Rc<dyn WalletProvider>>) -> Self {
        match provider {
            Some(_) => info!("Wallet provider detected"),
            None => warn!("No wallet provider detected"),
        }
        Self { provider }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Result<Rc<dyn WalletProvider>, AtmError> {
        self.provider.clone().ok_or(AtmError::ProviderUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWallet;

    #[test]
    fn test_missing_provider() {
        let gateway = ProviderGateway::detect(None);
        assert!(!gateway.is_available());
        assert_eq!(gateway.provider().err(), Some(AtmError::ProviderUnavailable));
    }

    #[test]
    fn test_detected_provider() {
        let wallet = FakeWallet::with_balance(0);
        let gateway = FakeWallet::gateway(Some(&wallet));
        assert!(gateway.is_available());
        assert!(gateway.provider().is_ok());
    }
}
