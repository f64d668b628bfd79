//! # ATM Contract Handle
//!
//! Binds the contract address, its ABI selectors and a signer. Rebuilt
//! whenever the signer changes (account switch, chain switch).

use std::rc::Rc;

use tracing::debug;

use crate::abi::{decode_uint256, AbiDescriptor, AbiError, AtmCall, AtmSelectors};
use crate::provider::{ProviderError, Signer, TransactionHandle};
use crate::types::{AccountAddress, TransactionRequest};

pub struct AtmContract {
    address: String,
    selectors: AtmSelectors,
    signer: Rc<dyn Signer>,
}

impl AtmContract {
    /// Bind `address` to `signer` using the calls declared in `abi`.
    pub fn bind(
        address: impl Into<String>,
        abi: &AbiDescriptor,
        signer: Rc<dyn Signer>,
    ) -> Result<Self, AbiError> {
        let address = address.into();
        let selectors = AtmSelectors::from_abi(abi)?;
        debug!(contract = %address, account = %signer.address(), "ATM contract bound");

        Ok(Self {
            address,
            selectors,
            signer,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Account the contract calls are signed by.
    pub fn account(&self) -> &AccountAddress {
        self.signer.address()
    }

    pub fn signer(&self) -> &Rc<dyn Signer> {
        &self.signer
    }

    /// `getBalance()`.
    pub async fn get_balance(&self) -> Result<u64, ProviderError> {
        let data = AtmCall::GetBalance.encode(&self.selectors);
        let output = self.signer.call(&self.address, data).await?;
        decode_uint256(&output).map_err(|e| ProviderError::Rpc(e.to_string()))
    }

    /// `deposit(amount)`.
    pub async fn deposit(&self, amount: u64) -> Result<Box<dyn TransactionHandle>, ProviderError> {
        self.submit(AtmCall::Deposit(amount)).await
    }

    /// `withdraw(amount)`.
    pub async fn withdraw(&self, amount: u64) -> Result<Box<dyn TransactionHandle>, ProviderError> {
        self.submit(AtmCall::Withdraw(amount)).await
    }

    async fn submit(&self, call: AtmCall) -> Result<Box<dyn TransactionHandle>, ProviderError> {
        let tx = TransactionRequest::contract_call(
            self.account().clone(),
            &self.address,
            call.encode(&self.selectors),
        );
        self.signer.send_transaction(tx).await
    }
}
