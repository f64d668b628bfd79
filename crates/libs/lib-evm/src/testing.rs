//! In-memory wallet, signer and chain for the tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use lib_core::config::DEFAULT_CONTRACT_ADDRESS;

use crate::abi::{encode_uint256, AbiDescriptor, AtmCall, AtmSelectors};
use crate::contract::AtmContract;
use crate::gateway::ProviderGateway;
use crate::provider::{EventSender, ProviderError, ProviderEvent, Signer, TransactionHandle, WalletProvider};
use crate::session::WalletSession;
use crate::types::{AccountAddress, TransactionRequest, TxHash, TxReceipt};

/// First two Hardhat development accounts.
pub const ALICE: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const BOB: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

/// Hardhat network (31337).
pub const HARDHAT_CHAIN_ID: &str = "0x7a69";

/// Contract state plus knobs for failure injection.
pub struct FakeChain {
    balance: Cell<u64>,
    pub fail_reads: Cell<bool>,
    pub reject_next_send: Cell<bool>,
    pub revert_next: Cell<bool>,
    pub fail_memos: Cell<bool>,
    hold_confirmation: RefCell<Option<oneshot::Receiver<()>>>,
    hold_read: RefCell<Option<oneshot::Receiver<()>>>,
    sent: RefCell<Vec<TransactionRequest>>,
    submitted_tx: async_channel::Sender<TxHash>,
    submitted_rx: async_channel::Receiver<TxHash>,
    block: Cell<u64>,
    selectors: AtmSelectors,
}

impl FakeChain {
    pub fn new(balance: u64) -> Rc<Self> {
        let (submitted_tx, submitted_rx) = async_channel::unbounded();
        let abi = AbiDescriptor::atm_default().unwrap();

        Rc::new(Self {
            balance: Cell::new(balance),
            fail_reads: Cell::new(false),
            reject_next_send: Cell::new(false),
            revert_next: Cell::new(false),
            fail_memos: Cell::new(false),
            hold_confirmation: RefCell::new(None),
            hold_read: RefCell::new(None),
            sent: RefCell::new(Vec::new()),
            submitted_tx,
            submitted_rx,
            block: Cell::new(1),
            selectors: AtmSelectors::from_abi(&abi).unwrap(),
        })
    }

    pub fn balance(&self) -> u64 {
        self.balance.get()
    }

    pub fn set_balance(&self, balance: u64) {
        self.balance.set(balance);
    }

    pub fn selectors(&self) -> AtmSelectors {
        self.selectors
    }

    /// Every transaction the wallet accepted, in order.
    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.borrow().clone()
    }

    /// Keep the next sent transaction unmined until the returned sender fires.
    pub fn hold_next_confirmation(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold_confirmation.borrow_mut() = Some(rx);
        tx
    }

    /// Keep the next `eth_call` unanswered until the returned sender fires.
    pub fn hold_next_read(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold_read.borrow_mut() = Some(rx);
        tx
    }

    /// Resolves once the wallet has accepted a transaction.
    pub async fn submitted(&self) -> TxHash {
        self.submitted_rx.recv().await.unwrap()
    }

    pub fn signer_for(self: &Rc<Self>, account: &str) -> Rc<dyn Signer> {
        Rc::new(FakeSigner {
            address: AccountAddress::from(account),
            chain: self.clone(),
        })
    }

    pub fn contract_for(self: &Rc<Self>, account: &str) -> AtmContract {
        let abi = AbiDescriptor::atm_default().unwrap();
        AtmContract::bind(DEFAULT_CONTRACT_ADDRESS, &abi, self.signer_for(account)).unwrap()
    }
}

enum Effect {
    None,
    Credit(u64),
    Debit(u64),
}

struct FakeSigner {
    address: AccountAddress,
    chain: Rc<FakeChain>,
}

#[async_trait(?Send)]
impl Signer for FakeSigner {
    fn address(&self) -> &AccountAddress {
        &self.address
    }

    async fn call(&self, to: &str, data: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let hold = self.chain.hold_read.borrow_mut().take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }

        if self.chain.fail_reads.get() {
            return Err(ProviderError::Rpc("connection refused".to_string()));
        }
        if !to.eq_ignore_ascii_case(DEFAULT_CONTRACT_ADDRESS) {
            return Ok(Vec::new());
        }

        match AtmCall::decode(&data, &self.chain.selectors) {
            Some(AtmCall::GetBalance) => Ok(encode_uint256(self.chain.balance()).to_vec()),
            _ => Err(ProviderError::Rpc("unsupported call".to_string())),
        }
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<Box<dyn TransactionHandle>, ProviderError> {
        if self.chain.reject_next_send.replace(false) {
            return Err(ProviderError::Rejected);
        }
        if tx.is_self_transfer() && self.chain.fail_memos.get() {
            return Err(ProviderError::Rpc("insufficient funds for gas * price + value".to_string()));
        }

        let effect = if tx.to.eq_ignore_ascii_case(DEFAULT_CONTRACT_ADDRESS) {
            match AtmCall::decode(&tx.data, &self.chain.selectors) {
                Some(AtmCall::Deposit(amount)) => Effect::Credit(amount),
                Some(AtmCall::Withdraw(amount)) => Effect::Debit(amount),
                _ => Effect::None,
            }
        } else {
            Effect::None
        };

        let index = {
            let mut sent = self.chain.sent.borrow_mut();
            sent.push(tx);
            sent.len()
        };
        let hash = TxHash(format!("0x{:064x}", index));
        let _ = self.chain.submitted_tx.try_send(hash.clone());

        Ok(Box::new(FakeHandle {
            hash,
            chain: self.chain.clone(),
            effect,
            revert: self.chain.revert_next.replace(false),
            hold: RefCell::new(self.chain.hold_confirmation.borrow_mut().take()),
        }))
    }
}

struct FakeHandle {
    hash: TxHash,
    chain: Rc<FakeChain>,
    effect: Effect,
    revert: bool,
    hold: RefCell<Option<oneshot::Receiver<()>>>,
}

#[async_trait(?Send)]
impl TransactionHandle for FakeHandle {
    fn hash(&self) -> &TxHash {
        &self.hash
    }

    async fn wait(&self) -> Result<TxReceipt, ProviderError> {
        let hold = self.hold.borrow_mut().take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }

        if self.revert {
            return Err(ProviderError::Reverted("execution reverted".to_string()));
        }

        let balance = self.chain.balance();
        match self.effect {
            Effect::Credit(amount) => self.chain.set_balance(balance + amount),
            Effect::Debit(amount) if amount > balance => {
                return Err(ProviderError::Reverted("InsufficientBalance".to_string()));
            }
            Effect::Debit(amount) => self.chain.set_balance(balance - amount),
            Effect::None => {}
        }

        let block = self.chain.block.get();
        self.chain.block.set(block + 1);
        Ok(TxReceipt {
            hash: self.hash.clone(),
            block_number: Some(block),
        })
    }
}

/// Injected wallet over a [`FakeChain`].
pub struct FakeWallet {
    pub chain: Rc<FakeChain>,
    accounts: RefCell<Vec<AccountAddress>>,
    chain_id: RefCell<String>,
    /// `eth_requestAccounts` returns an empty list
    pub deny: Cell<bool>,
    /// `eth_requestAccounts` fails with a user rejection
    pub reject: Cell<bool>,
    requests: Cell<usize>,
    hold_request: RefCell<Option<oneshot::Receiver<()>>>,
    events: RefCell<Option<EventSender>>,
}

impl FakeWallet {
    pub fn new(chain: Rc<FakeChain>, accounts: &[&str]) -> Rc<Self> {
        Rc::new(Self {
            chain,
            accounts: RefCell::new(accounts.iter().map(|a| AccountAddress::from(*a)).collect()),
            chain_id: RefCell::new(HARDHAT_CHAIN_ID.to_string()),
            deny: Cell::new(false),
            reject: Cell::new(false),
            requests: Cell::new(0),
            hold_request: RefCell::new(None),
            events: RefCell::new(None),
        })
    }

    /// Wallet with ALICE selected, on a chain holding `balance`.
    pub fn with_balance(balance: u64) -> Rc<Self> {
        Self::new(FakeChain::new(balance), &[ALICE])
    }

    /// Session over `wallet`, or over no provider at all.
    pub fn session(wallet: Option<&Rc<FakeWallet>>) -> WalletSession {
        let abi = AbiDescriptor::atm_default().unwrap();
        WalletSession::new(Self::gateway(wallet), DEFAULT_CONTRACT_ADDRESS, abi)
    }

    pub fn gateway(wallet: Option<&Rc<FakeWallet>>) -> ProviderGateway {
        ProviderGateway::detect(wallet.map(|w| w.clone() as Rc<dyn WalletProvider>))
    }

    pub fn account_requests(&self) -> usize {
        self.requests.get()
    }

    /// Keep the next `eth_requestAccounts` unanswered until the returned sender fires.
    pub fn hold_next_request(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold_request.borrow_mut() = Some(rx);
        tx
    }

    pub fn switch_accounts(&self, accounts: &[&str]) {
        let accounts: Vec<AccountAddress> = accounts.iter().map(|a| AccountAddress::from(*a)).collect();
        *self.accounts.borrow_mut() = accounts.clone();
        self.emit(ProviderEvent::AccountsChanged(accounts));
    }

    pub fn switch_chain(&self, chain_id: &str) {
        *self.chain_id.borrow_mut() = chain_id.to_string();
        self.emit(ProviderEvent::ChainChanged(chain_id.to_string()));
    }

    pub fn disconnect(&self) {
        self.emit(ProviderEvent::Disconnected);
    }

    fn emit(&self, event: ProviderEvent) {
        if let Some(events) = self.events.borrow().as_ref() {
            let _ = events.try_send(event);
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<AccountAddress>, ProviderError> {
        self.requests.set(self.requests.get() + 1);

        let hold = self.hold_request.borrow_mut().take();
        if let Some(hold) = hold {
            let _ = hold.await;
        }

        if self.reject.get() {
            return Err(ProviderError::Rejected);
        }
        if self.deny.get() {
            return Ok(Vec::new());
        }
        Ok(self.accounts.borrow().clone())
    }

    async fn signer(&self) -> Result<Rc<dyn Signer>, ProviderError> {
        let account = self
            .accounts
            .borrow()
            .first()
            .cloned()
            .ok_or_else(|| ProviderError::Rpc("no accounts".to_string()))?;
        Ok(self.chain.signer_for(account.as_str()))
    }

    async fn chain_id(&self) -> Result<String, ProviderError> {
        Ok(self.chain_id.borrow().clone())
    }

    fn subscribe(&self, events: EventSender) {
        *self.events.borrow_mut() = Some(events);
    }
}
