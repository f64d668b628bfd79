//! Receipt polling for submitted transactions.
//!
//! A transaction stays outstanding until the node reports a receipt for it.
//! There is no poll limit: a transaction that is still in the mempool keeps
//! its pending slot however long the chain takes.

use std::future::Future;

use serde::Deserialize;
use tracing::debug;

use crate::provider::ProviderError;
use crate::types::{TxHash, TxReceipt};

/// Fields of an `eth_getTransactionReceipt` result the client looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    /// `0x1` on success, `0x0` when execution reverted
    pub status: Option<String>,
    pub block_number: Option<String>,
}

impl RpcReceipt {
    pub fn into_receipt(self, hash: &TxHash) -> Result<TxReceipt, ProviderError> {
        if self.status.as_deref() == Some("0x0") {
            return Err(ProviderError::Reverted(format!("transaction {} reverted", hash)));
        }

        let block_number = self
            .block_number
            .and_then(|n| u64::from_str_radix(n.trim_start_matches("0x"), 16).ok());

        Ok(TxReceipt {
            hash: hash.clone(),
            block_number,
        })
    }
}

/// Fetch the receipt, sleeping between attempts, until one is available.
///
/// Only a failed fetch or a reverted receipt ends the wait early.
pub async fn poll_receipt<Fetch, FetchFut, Sleep, SleepFut>(
    hash: &TxHash,
    mut fetch: Fetch,
    mut sleep: Sleep,
) -> Result<TxReceipt, ProviderError>
where
    Fetch: FnMut() -> FetchFut,
    FetchFut: Future<Output = Result<Option<RpcReceipt>, ProviderError>>,
    Sleep: FnMut() -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let mut polls: u64 = 0;
    loop {
        if let Some(receipt) = fetch().await? {
            debug!(hash = %hash, polls, "Receipt available");
            return receipt.into_receipt(hash);
        }
        polls += 1;
        sleep().await;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn hash() -> TxHash {
        TxHash("0xabc".to_string())
    }

    #[tokio::test]
    async fn test_waits_as_long_as_the_receipt_is_missing() {
        let fetches = Cell::new(0u32);
        let sleeps = Cell::new(0u32);

        let receipt = poll_receipt(
            &hash(),
            || {
                fetches.set(fetches.get() + 1);
                let ready = fetches.get() > 5_000;
                async move {
                    Ok(ready.then(|| RpcReceipt {
                        status: Some("0x1".to_string()),
                        block_number: Some("0x1f".to_string()),
                    }))
                }
            },
            || {
                sleeps.set(sleeps.get() + 1);
                async {}
            },
        )
        .await
        .unwrap();

        assert_eq!(receipt.block_number, Some(31));
        assert_eq!(sleeps.get(), 5_000);
    }

    #[tokio::test]
    async fn test_reverted_receipt() {
        let err = poll_receipt(
            &hash(),
            || async {
                Ok(Some(RpcReceipt {
                    status: Some("0x0".to_string()),
                    block_number: None,
                }))
            },
            || async {},
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ProviderError::Reverted(_)));
    }

    #[tokio::test]
    async fn test_fetch_error_ends_the_wait() {
        let err = poll_receipt(
            &hash(),
            || async { Err(ProviderError::Rpc("node unreachable".to_string())) },
            || async {},
        )
        .await
        .unwrap_err();

        assert_eq!(err, ProviderError::Rpc("node unreachable".to_string()));
    }
}
