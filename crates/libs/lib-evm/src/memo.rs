//! # Memo Recorder
//!
//! Records a planner result on-chain as a self-addressed transaction whose
//! calldata is the UTF-8 result text. The memo does not call the ATM contract
//! and does not change the cached balance.
//!
//! Failures are reported as [`AtmError::MemoFailure`] so the caller can log them
//! without failing the calculation that produced the text.

use lib_core::{AtmError, Result};
use lib_utils::hex0x_encode;
use tracing::{debug, warn};

use crate::contract::AtmContract;
use crate::facade::ContractFacade;
use crate::types::TxReceipt;

#[derive(Debug, Clone, Copy)]
pub struct MemoRecorder {
    value_wei: u128,
}

impl MemoRecorder {
    pub fn new(value_wei: u128) -> Self {
        Self { value_wei }
    }

    pub fn value_wei(&self) -> u128 {
        self.value_wei
    }

    /// Calldata for `message`.
    pub fn encode(message: &str) -> Vec<u8> {
        message.as_bytes().to_vec()
    }

    pub async fn record(&self, facade: &ContractFacade, contract: &AtmContract, message: &str) -> Result<TxReceipt> {
        let payload = Self::encode(message);
        debug!(memo = message, payload = %hex0x_encode(&payload), "Recording memo");

        facade
            .send_memo_transaction(contract, payload, self.value_wei)
            .await
            .map_err(|e| {
                warn!(error = %e, "Memo transaction failed");
                match e {
                    AtmError::OperationInProgress => {
                        AtmError::MemoFailure("another transaction is pending".to_string())
                    }
                    AtmError::ContractCall(reason) => AtmError::MemoFailure(reason),
                    other => AtmError::MemoFailure(other.to_string()),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeChain, ALICE};

    #[test]
    fn test_encode_is_utf8() {
        assert_eq!(MemoRecorder::encode("Monthly savings: 5.00 ETH"), b"Monthly savings: 5.00 ETH".to_vec());
    }

    #[tokio::test]
    async fn test_record_sends_self_transfer() {
        let chain = FakeChain::new(0);
        let contract = chain.contract_for(ALICE);
        let recorder = MemoRecorder::new(1_000);

        let receipt = recorder
            .record(&ContractFacade::new(), &contract, "Investment return: 1210.00 ETH")
            .await
            .unwrap();

        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, ALICE);
        assert_eq!(sent[0].value_wei, 1_000);
        assert_eq!(sent[0].data, b"Investment return: 1210.00 ETH".to_vec());
        assert!(receipt.block_number.is_some());
    }

    #[tokio::test]
    async fn test_failure_maps_to_memo_failure() {
        let chain = FakeChain::new(0);
        chain.fail_memos.set(true);
        let contract = chain.contract_for(ALICE);

        let err = MemoRecorder::new(1)
            .record(&ContractFacade::new(), &contract, "x")
            .await
            .unwrap_err();
        assert!(matches!(err, AtmError::MemoFailure(_)));
    }
}
