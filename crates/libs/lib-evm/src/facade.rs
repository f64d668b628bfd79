//! # Contract Facade
//!
//! Every contract interaction goes through here. Reads are free; mutating
//! transactions (deposit, withdraw, memo) pass a [`TxGate`] that admits one at
//! a time and fails the others fast with [`AtmError::OperationInProgress`].
//!
//! ## Mutating Transaction Lifecycle
//!
//! 1. Acquire the gate (or fail fast)
//! 2. Deposits and withdrawals mark the balance stale
//! 3. Record a [`PendingTransaction`] and ask the wallet to sign
//! 4. Wait for the receipt, record the terminal status, discard the pending entry
//! 5. Release the gate
//! 6. On success, refresh the balance
//!
//! A failure anywhere after step 2 leaves the balance stale.

use std::cell::{Cell, RefCell};
use std::future::Future;

use lib_core::{AtmError, Result};
use shared::{TxKind, TxStatus};
use tracing::{info, warn};

use crate::balance::BalanceCache;
use crate::contract::AtmContract;
use crate::provider::{ProviderError, TransactionHandle};
use crate::types::{PendingTransaction, TransactionRequest, TxReceipt};

/// Admits one mutating transaction at a time.
#[derive(Debug, Default)]
pub struct TxGate {
    busy: Cell<bool>,
}

/// Held for as long as a mutating transaction is outstanding.
#[derive(Debug)]
pub struct TxPermit<'a> {
    gate: &'a TxGate,
}

impl TxGate {
    pub fn try_acquire(&self) -> Result<TxPermit<'_>> {
        if self.busy.replace(true) {
            return Err(AtmError::OperationInProgress);
        }
        Ok(TxPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Drop for TxPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.set(false);
    }
}

#[derive(Default)]
pub struct ContractFacade {
    gate: TxGate,
    pending: RefCell<Option<PendingTransaction>>,
}

impl ContractFacade {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding mutating transaction, if any.
    pub fn pending(&self) -> Option<PendingTransaction> {
        self.pending.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.gate.is_busy()
    }

    /// Read the contract balance. Not gated.
    pub async fn get_balance(&self, contract: &AtmContract) -> Result<u64> {
        contract.get_balance().await.map_err(|e| {
            warn!(error = %e, "getBalance failed");
            AtmError::ContractCall(e.to_string())
        })
    }

    pub async fn deposit(&self, contract: &AtmContract, amount: u64, balance: &BalanceCache) -> Result<TxReceipt> {
        let receipt = {
            let _permit = self.gate.try_acquire()?;
            balance.invalidate();
            self.track(
                PendingTransaction::new(TxKind::Deposit, Some(amount), None),
                contract.deposit(amount),
            )
            .await?
        };

        self.refresh_after(contract, balance).await;
        Ok(receipt)
    }

    pub async fn withdraw(&self, contract: &AtmContract, amount: u64, balance: &BalanceCache) -> Result<TxReceipt> {
        let receipt = {
            let _permit = self.gate.try_acquire()?;
            balance.invalidate();
            self.track(
                PendingTransaction::new(TxKind::Withdraw, Some(amount), None),
                contract.withdraw(amount),
            )
            .await?
        };

        self.refresh_after(contract, balance).await;
        Ok(receipt)
    }

    /// Self-transfer of `value_wei` carrying `payload`. Leaves the balance alone.
    pub async fn send_memo_transaction(
        &self,
        contract: &AtmContract,
        payload: Vec<u8>,
        value_wei: u128,
    ) -> Result<TxReceipt> {
        let _permit = self.gate.try_acquire()?;
        let tx = TransactionRequest::memo(contract.account().clone(), payload.clone(), value_wei);

        self.track(
            PendingTransaction::new(TxKind::Memo, None, Some(payload)),
            contract.signer().send_transaction(tx),
        )
        .await
    }

    /// Drive one transaction from signing request to terminal status.
    async fn track<F>(&self, pending: PendingTransaction, submit: F) -> Result<TxReceipt>
    where
        F: Future<Output = std::result::Result<Box<dyn TransactionHandle>, ProviderError>>,
    {
        let kind = pending.kind;
        *self.pending.borrow_mut() = Some(pending);

        let outcome = self.submit_and_wait(submit).await;

        let status = if outcome.is_ok() { TxStatus::Confirmed } else { TxStatus::Failed };
        self.update(|p| p.status = status);
        self.pending.borrow_mut().take();

        match outcome {
            Ok(receipt) => {
                info!(kind = kind.label(), hash = %receipt.hash, block = ?receipt.block_number, "Transaction confirmed");
                Ok(receipt)
            }
            Err(e) => {
                warn!(kind = kind.label(), error = %e, "Transaction failed");
                Err(AtmError::ContractCall(e.to_string()))
            }
        }
    }

    async fn submit_and_wait<F>(&self, submit: F) -> std::result::Result<TxReceipt, ProviderError>
    where
        F: Future<Output = std::result::Result<Box<dyn TransactionHandle>, ProviderError>>,
    {
        let handle = submit.await?;
        let hash = handle.hash().clone();
        info!(hash = %hash, "Transaction submitted");
        self.update(|p| p.hash = Some(hash));

        handle.wait().await
    }

    fn update(&self, change: impl FnOnce(&mut PendingTransaction)) {
        if let Some(pending) = self.pending.borrow_mut().as_mut() {
            change(pending);
        }
    }

    /// Post-confirmation read. A failure here does not undo the transaction;
    /// the balance just stays stale.
    async fn refresh_after(&self, contract: &AtmContract, balance: &BalanceCache) {
        if let Err(e) = balance.refresh(self, contract).await {
            warn!(error = %e, "Balance refresh after confirmation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::Staleness;
    use crate::testing::{FakeChain, ALICE};

    #[test]
    fn test_gate_admits_one_permit() {
        let gate = TxGate::default();
        let permit = gate.try_acquire().unwrap();
        assert!(gate.is_busy());
        assert_eq!(gate.try_acquire().unwrap_err(), AtmError::OperationInProgress);

        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_ok());
    }

    #[tokio::test]
    async fn test_deposit_confirms_and_refreshes() {
        let chain = FakeChain::new(5);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let balance = BalanceCache::new();
        balance.refresh(&facade, &contract).await.unwrap();

        let receipt = facade.deposit(&contract, 1, &balance).await.unwrap();
        assert!(receipt.block_number.is_some());
        assert_eq!(balance.value(), Some(6));
        assert_eq!(balance.staleness(), Staleness::Fresh);
        assert!(facade.pending().is_none());
        assert!(!facade.is_busy());
    }

    #[tokio::test]
    async fn test_rejected_signature_leaves_balance_stale() {
        let chain = FakeChain::new(5);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let balance = BalanceCache::new();
        balance.refresh(&facade, &contract).await.unwrap();

        chain.reject_next_send.set(true);
        let err = facade.withdraw(&contract, 1, &balance).await.unwrap_err();

        assert_eq!(err, AtmError::ContractCall("User rejected the request".to_string()));
        assert_eq!(balance.staleness(), Staleness::Stale);
        assert_eq!(balance.value(), Some(5));
        assert!(facade.pending().is_none());
        assert!(!facade.is_busy());
    }

    #[tokio::test]
    async fn test_pending_is_visible_until_confirmation() {
        let chain = FakeChain::new(0);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let balance = BalanceCache::new();
        let release = chain.hold_next_confirmation();

        let (result, observed) = futures::join!(facade.deposit(&contract, 1, &balance), async {
            chain.submitted().await;
            let observed = facade.pending();
            let _ = release.send(());
            observed
        });

        result.unwrap();
        let observed = observed.expect("pending while unconfirmed");
        assert_eq!(observed.kind, TxKind::Deposit);
        assert_eq!(observed.status, TxStatus::Submitted);
        assert!(observed.hash.is_some());
        assert!(facade.pending().is_none());
    }

    #[tokio::test]
    async fn test_memo_does_not_touch_balance() {
        let chain = FakeChain::new(3);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let balance = BalanceCache::new();
        balance.refresh(&facade, &contract).await.unwrap();

        facade
            .send_memo_transaction(&contract, b"note".to_vec(), 10)
            .await
            .unwrap();

        assert_eq!(balance.staleness(), Staleness::Fresh);
        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_self_transfer());
        assert_eq!(sent[0].data, b"note".to_vec());
        assert_eq!(sent[0].value_wei, 10);
    }
}
