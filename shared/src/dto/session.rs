//! Session DTOs: the read-only projection the page renders.

use serde::{Deserialize, Serialize};

use super::planner::{ReturnEstimate, SavingsPlan};

/// Wallet session state as seen by the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No injected wallet provider was found
    #[default]
    NoProvider,
    Disconnected,
    Connecting,
    Connected,
}

/// Balance as the page may display it.
///
/// A value is only shown as a number when it is fresh; during the window between
/// a mutating submission and the following read it is `Updating`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BalanceView {
    #[default]
    Unknown,
    Updating {
        #[serde(skip_serializing_if = "Option::is_none")]
        last: Option<u64>,
    },
    Fresh {
        value: u64,
    },
}

impl BalanceView {
    /// Trusted balance, if any.
    pub fn fresh_value(&self) -> Option<u64> {
        match self {
            BalanceView::Fresh { value } => Some(*value),
            _ => None,
        }
    }
}

/// Kind of a mutating transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Deposit,
    Withdraw,
    Memo,
}

impl TxKind {
    pub fn label(&self) -> &'static str {
        match self {
            TxKind::Deposit => "deposit",
            TxKind::Withdraw => "withdraw",
            TxKind::Memo => "memo",
        }
    }
}

/// Lifecycle status of a mutating transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Submitted,
    Confirmed,
    Failed,
}

impl TxStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TxStatus::Submitted)
    }
}

/// The one outstanding mutating transaction, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingView {
    pub kind: TxKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    pub status: TxStatus,
    /// Set once the wallet has accepted the transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Outcome of the last memo recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum MemoOutcome {
    Pending,
    Recorded { hash: String },
    Failed { reason: String },
}

/// Last memo the calculators asked to record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoView {
    pub message: String,
    pub outcome: MemoOutcome,
}

/// Everything the page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AtmView {
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    pub balance: BalanceView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<PendingView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<ReturnEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<MemoView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl AtmView {
    pub fn is_connected(&self) -> bool {
        self.status == SessionStatus::Connected
    }

    /// `true` while a mutating transaction is outstanding.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}
