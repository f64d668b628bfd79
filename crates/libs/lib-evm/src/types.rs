//! # EVM Type Definitions
//!
//! Common data structures shared by the provider seam, the contract facade and
//! the session.
//!
//! - [`AccountAddress`]: `0x` account, compared case-insensitively (checksummed
//!   and lowercase spellings of the same account are equal)
//! - [`TxHash`] / [`TxReceipt`]: what a wallet hands back for a sent transaction
//! - [`TransactionRequest`]: what the client asks the wallet to sign and send
//! - [`PendingTransaction`]: the one outstanding mutating transaction

use serde::{Deserialize, Serialize};
use shared::{PendingView, TxKind, TxStatus};
use std::fmt;

/// Externally owned account address.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for AccountAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountAddress {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccountAddress {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Transaction hash as reported by the wallet (`0x` + 64 hex digits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
}

/// Transaction the wallet is asked to sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: AccountAddress,
    pub to: String,
    /// Attached value in wei
    pub value_wei: u128,
    pub data: Vec<u8>,
}

impl TransactionRequest {
    /// Call into a contract without attaching value.
    pub fn contract_call(from: AccountAddress, contract: &str, data: Vec<u8>) -> Self {
        Self {
            from,
            to: contract.to_string(),
            value_wei: 0,
            data,
        }
    }

    /// Self-addressed value transfer carrying `payload` as calldata.
    pub fn memo(from: AccountAddress, payload: Vec<u8>, value_wei: u128) -> Self {
        Self {
            to: from.as_str().to_string(),
            from,
            value_wei,
            data: payload,
        }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.from.as_str().eq_ignore_ascii_case(&self.to)
    }
}

/// The single mutating transaction the client is tracking.
///
/// Created when the wallet is asked to sign, gets its hash once the wallet
/// accepts it, and is discarded once it reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub kind: TxKind,
    /// Contract amount for deposits and withdrawals
    pub amount: Option<u64>,
    /// Calldata for memos
    pub payload: Option<Vec<u8>>,
    pub status: TxStatus,
    pub hash: Option<TxHash>,
}

impl PendingTransaction {
    pub fn new(kind: TxKind, amount: Option<u64>, payload: Option<Vec<u8>>) -> Self {
        Self {
            kind,
            amount,
            payload,
            status: TxStatus::Submitted,
            hash: None,
        }
    }

    pub fn to_view(&self) -> PendingView {
        PendingView {
            kind: self.kind,
            amount: self.amount,
            status: self.status,
            hash: self.hash.as_ref().map(|h| h.0.clone()),
        }
    }
}
