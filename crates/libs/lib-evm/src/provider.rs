//! # Wallet Provider Interface
//!
//! The seam between the client and an injected EIP-1193 wallet. The browser
//! build implements these traits over `window.ethereum`; tests implement them
//! in memory.
//!
//! The client is single-threaded, so the traits are `?Send` and handles are
//! shared as `Rc<dyn ...>`.

use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{AccountAddress, TransactionRequest, TxHash, TxReceipt};

/// Channel on which a provider pushes its notifications.
pub type EventSender = async_channel::Sender<ProviderEvent>;

/// Provider and signer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("No wallet provider available")]
    Unavailable,

    #[error("User rejected the request")]
    Rejected,

    #[error("Transaction reverted: {0}")]
    Reverted(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

impl ProviderError {
    /// Map an EIP-1193 / JSON-RPC error code.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            // User rejected request / unauthorized
            4001 | 4100 => ProviderError::Rejected,
            // Disconnected / chain disconnected
            4900 | 4901 => ProviderError::Unavailable,
            // Execution reverted
            3 => ProviderError::Reverted(message),
            _ => ProviderError::Rpc(message),
        }
    }
}

/// Notification pushed by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New account list; empty when the user locked or disconnected the wallet
    AccountsChanged(Vec<AccountAddress>),
    /// New chain id (`0x`-prefixed hex)
    ChainChanged(String),
    Disconnected,
}

/// Injected wallet.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Ask the user to authorize accounts (`eth_requestAccounts`).
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>, ProviderError>;

    /// Signer bound to the wallet's currently selected account.
    async fn signer(&self) -> Result<Rc<dyn Signer>, ProviderError>;

    /// Current chain id (`eth_chainId`).
    async fn chain_id(&self) -> Result<String, ProviderError>;

    /// Start forwarding account, chain and disconnect notifications.
    fn subscribe(&self, events: EventSender);
}

/// Account-bound handle able to read contracts and send transactions.
#[async_trait(?Send)]
pub trait Signer {
    fn address(&self) -> &AccountAddress;

    /// Read-only contract call (`eth_call`), returning the raw return data.
    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ProviderError>;

    /// Sign and broadcast. Resolves once the wallet has accepted the transaction.
    async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<Box<dyn TransactionHandle>, ProviderError>;
}

/// A broadcast transaction that has not been observed as mined yet.
#[async_trait(?Send)]
pub trait TransactionHandle {
    fn hash(&self) -> &TxHash;

    /// Wait for the transaction to be mined. A reverted transaction is an error.
    async fn wait(&self) -> Result<TxReceipt, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_code_mapping() {
        assert_eq!(ProviderError::from_rpc(4001, "User denied"), ProviderError::Rejected);
        assert_eq!(ProviderError::from_rpc(4900, "Disconnected"), ProviderError::Unavailable);
        assert_eq!(
            ProviderError::from_rpc(3, "execution reverted"),
            ProviderError::Reverted("execution reverted".to_string())
        );
        assert_eq!(
            ProviderError::from_rpc(-32603, "Internal error"),
            ProviderError::Rpc("Internal error".to_string())
        );
    }
}
