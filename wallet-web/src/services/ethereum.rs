//! EIP-1193 Wallet Integration via wasm-bindgen
//!
//! Implements the `lib-evm` provider traits over the injected `window.ethereum`
//! object (MetaMask and compatible wallets). All requests go through a single
//! JavaScript shim that normalizes wallet errors to `{ code, message }`.

use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use lib_evm::{
    poll_receipt, AccountAddress, EventSender, ProviderError, ProviderEvent, RpcReceipt, Signer,
    TransactionHandle, TransactionRequest, TxHash, TxReceipt, WalletProvider,
};
use lib_utils::{hex0x_decode, hex0x_encode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::utils::constants::RECEIPT_POLL_INTERVAL_MS;

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen(inline_js = "
export function hasEthereum() {
    return typeof window !== 'undefined' && !!window.ethereum;
}

export async function ethRequest(method, params) {
    if (!window.ethereum) {
        throw { code: 4900, message: 'No wallet provider injected' };
    }
    try {
        return await window.ethereum.request({ method, params });
    } catch (error) {
        const code = (error && typeof error.code === 'number') ? error.code : -32603;
        const message = (error && error.message) ? error.message : String(error);
        throw { code, message };
    }
}

export function onEthereumEvent(name, callback) {
    if (window.ethereum && typeof window.ethereum.on === 'function') {
        window.ethereum.on(name, callback);
    }
}
")]
extern "C" {
    /// Check whether a wallet injected `window.ethereum`
    fn hasEthereum() -> bool;

    /// `window.ethereum.request({ method, params })`
    #[wasm_bindgen(catch)]
    async fn ethRequest(method: &str, params: JsValue) -> Result<JsValue, JsValue>;

    /// `window.ethereum.on(name, callback)`
    fn onEthereumEvent(name: &str, callback: &Closure<dyn FnMut(JsValue)>);
}

/// Convert a normalized `{ code, message }` rejection.
fn provider_error(error: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&error, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(-32603.0) as i64;
    let message = js_sys::Reflect::get(&error, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{:?}", error));

    ProviderError::from_rpc(code, message)
}

async fn request<T: DeserializeOwned>(method: &str, params: serde_json::Value) -> Result<T, ProviderError> {
    let params = params
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ProviderError::Rpc(e.to_string()))?;

    let value = ethRequest(method, params).await.map_err(provider_error)?;

    serde_wasm_bindgen::from_value(value).map_err(|e| ProviderError::Rpc(format!("{}: {}", method, e)))
}

// ============================================================================
// PROVIDER
// ============================================================================

/// The injected wallet.
pub struct Eip1193Provider;

impl Eip1193Provider {
    /// `Some` when a wallet is injected into the page.
    pub fn detect() -> Option<Rc<dyn WalletProvider>> {
        if hasEthereum() {
            Some(Rc::new(Eip1193Provider))
        } else {
            None
        }
    }
}

fn to_accounts(raw: Vec<String>) -> Vec<AccountAddress> {
    raw.into_iter().map(AccountAddress::from).collect()
}

#[async_trait(?Send)]
impl WalletProvider for Eip1193Provider {
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>, ProviderError> {
        let accounts: Vec<String> = request("eth_requestAccounts", json!([])).await?;
        Ok(to_accounts(accounts))
    }

    async fn signer(&self) -> Result<Rc<dyn Signer>, ProviderError> {
        let accounts: Vec<String> = request("eth_accounts", json!([])).await?;
        let address = accounts
            .into_iter()
            .next()
            .map(AccountAddress::from)
            .ok_or(ProviderError::Rejected)?;

        Ok(Rc::new(Eip1193Signer { address }))
    }

    async fn chain_id(&self) -> Result<String, ProviderError> {
        request("eth_chainId", json!([])).await
    }

    fn subscribe(&self, events: EventSender) {
        let sender = events.clone();
        let accounts_changed = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            let accounts: Vec<String> = serde_wasm_bindgen::from_value(value).unwrap_or_default();
            let _ = sender.try_send(ProviderEvent::AccountsChanged(to_accounts(accounts)));
        });

        let sender = events.clone();
        let chain_changed = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            if let Some(chain_id) = value.as_string() {
                let _ = sender.try_send(ProviderEvent::ChainChanged(chain_id));
            }
        });

        let disconnected = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
            let _ = events.try_send(ProviderEvent::Disconnected);
        });

        onEthereumEvent("accountsChanged", &accounts_changed);
        onEthereumEvent("chainChanged", &chain_changed);
        onEthereumEvent("disconnect", &disconnected);

        // Listeners live as long as the page
        accounts_changed.forget();
        chain_changed.forget();
        disconnected.forget();
    }
}

// ============================================================================
// SIGNER
// ============================================================================

struct Eip1193Signer {
    address: AccountAddress,
}

#[async_trait(?Send)]
impl Signer for Eip1193Signer {
    fn address(&self) -> &AccountAddress {
        &self.address
    }

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let params = json!([
            { "from": self.address.as_str(), "to": to, "data": hex0x_encode(&data) },
            "latest"
        ]);
        let output: String = request("eth_call", params).await?;
        hex0x_decode(&output).map_err(|e| ProviderError::Rpc(e.to_string()))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<Box<dyn TransactionHandle>, ProviderError> {
        let params = json!([{
            "from": tx.from.as_str(),
            "to": tx.to,
            "value": format!("0x{:x}", tx.value_wei),
            "data": hex0x_encode(&tx.data),
        }]);
        let hash: String = request("eth_sendTransaction", params).await?;
        log::info!("Transaction sent: {}", hash);

        Ok(Box::new(PolledReceipt { hash: TxHash(hash) }))
    }
}

// ============================================================================
// RECEIPTS
// ============================================================================

/// Polls `eth_getTransactionReceipt` until the transaction is mined.
struct PolledReceipt {
    hash: TxHash,
}

#[async_trait(?Send)]
impl TransactionHandle for PolledReceipt {
    fn hash(&self) -> &TxHash {
        &self.hash
    }

    async fn wait(&self) -> Result<TxReceipt, ProviderError> {
        poll_receipt(
            &self.hash,
            || request::<Option<RpcReceipt>>("eth_getTransactionReceipt", json!([self.hash.0])),
            || TimeoutFuture::new(RECEIPT_POLL_INTERVAL_MS),
        )
        .await
    }
}
