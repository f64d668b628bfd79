//! # EVM Wallet Library
//!
//! Browser-wallet integration for the ATM contract: provider detection, the
//! wallet session state machine, contract calls behind a single-pending-transaction
//! gate, the balance cache, and memo recording of planner results.
//!
//! Everything here is single-threaded. Provider and signer traits are
//! `#[async_trait(?Send)]` so the same code drives the injected browser wallet
//! (`wallet-web`) and the in-memory fakes used by the tests.

pub mod abi;
pub mod balance;
pub mod client;
pub mod contract;
pub mod facade;
pub mod gateway;
pub mod memo;
pub mod provider;
pub mod receipt;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types from root for convenience
pub use abi::{AbiDescriptor, AbiError, AtmCall, AtmSelectors, ATM_ABI_JSON};
pub use balance::{BalanceCache, Staleness};
pub use client::AtmClient;
pub use contract::AtmContract;
pub use facade::{ContractFacade, TxGate, TxPermit};
pub use gateway::ProviderGateway;
pub use memo::MemoRecorder;
pub use provider::{EventSender, ProviderError, ProviderEvent, Signer, TransactionHandle, WalletProvider};
pub use receipt::{poll_receipt, RpcReceipt};
pub use session::{SessionChange, SessionState, WalletSession};
pub use types::{AccountAddress, PendingTransaction, TransactionRequest, TxHash, TxReceipt};
