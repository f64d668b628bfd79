//! # Wallet Session
//!
//! State machine over the injected wallet:
//!
//! ```text
//! NoProvider ──(provider detected)──▶ Disconnected ──connect──▶ Connecting
//!                                          ▲                      │
//!                                          │ denied / no accounts │ accounts granted
//!                                          └──────────────────────┤
//!                                          ▲                      ▼
//!                                          └──(no accounts)─── Connected
//! ```
//!
//! The session owns the receiving end of the provider's notification channel.
//! Events are applied one at a time by whoever drives [`WalletSession::next_event`],
//! and no `RefCell` borrow is held across an await, so user intents and wallet
//! notifications never observe a half-written state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lib_core::{AtmError, Result};
use shared::SessionStatus;
use tracing::{debug, info, warn};

use crate::abi::AbiDescriptor;
use crate::contract::AtmContract;
use crate::gateway::ProviderGateway;
use crate::provider::{ProviderEvent, WalletProvider};
use crate::types::AccountAddress;

/// Session state. The contract handle only exists while connected.
#[derive(Clone)]
pub enum SessionState {
    NoProvider,
    Disconnected,
    Connecting,
    Connected {
        account: AccountAddress,
        contract: Rc<AtmContract>,
    },
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::NoProvider => SessionStatus::NoProvider,
            SessionState::Disconnected => SessionStatus::Disconnected,
            SessionState::Connecting => SessionStatus::Connecting,
            SessionState::Connected { .. } => SessionStatus::Connected,
        }
    }
}

/// What applying a provider event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Unchanged,
    AccountChanged(AccountAddress),
    ChainChanged(String),
    Disconnected,
}

pub struct WalletSession {
    gateway: ProviderGateway,
    contract_address: String,
    abi: AbiDescriptor,
    state: RefCell<SessionState>,
    chain_id: RefCell<Option<String>>,
    /// Bumped by every connect attempt and every session end; a connect
    /// only completes if nothing bumped it while accounts were requested.
    attempt: Cell<u64>,
    events: async_channel::Receiver<ProviderEvent>,
}

impl WalletSession {
    /// Start in `Disconnected` when a provider was detected, `NoProvider` otherwise.
    pub fn new(gateway: ProviderGateway, contract_address: impl Into<String>, abi: AbiDescriptor) -> Self {
        let (sender, events) = async_channel::unbounded();

        let state = match gateway.provider() {
            Ok(provider) => {
                provider.subscribe(sender);
                SessionState::Disconnected
            }
            Err(_) => SessionState::NoProvider,
        };

        Self {
            gateway,
            contract_address: contract_address.into(),
            abi,
            state: RefCell::new(state),
            chain_id: RefCell::new(None),
            attempt: Cell::new(0),
            events,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    pub fn account(&self) -> Option<AccountAddress> {
        self.connected().map(|(account, _)| account)
    }

    pub fn chain_id(&self) -> Option<String> {
        self.chain_id.borrow().clone()
    }

    /// Contract handle of the current session.
    pub fn contract(&self) -> Result<Rc<AtmContract>> {
        self.connected()
            .map(|(_, contract)| contract)
            .ok_or(AtmError::NotConnected)
    }

    /// Ask the wallet for accounts and bind the contract to its signer.
    ///
    /// Already connected: returns the current account. Already connecting:
    /// fails fast with [`AtmError::OperationInProgress`]. If the wallet
    /// disconnects while accounts are being requested, the attempt fails with
    /// [`AtmError::ConnectionDenied`] and the session stays as the event left it.
    pub async fn connect(&self) -> Result<AccountAddress> {
        let provider = self.gateway.provider()?;

        match &*self.state.borrow() {
            SessionState::Connecting => return Err(AtmError::OperationInProgress),
            SessionState::Connected { account, .. } => return Ok(account.clone()),
            SessionState::NoProvider | SessionState::Disconnected => {}
        }

        self.set_state(SessionState::Connecting);
        let attempt = self.next_attempt();
        info!("Requesting wallet accounts");

        let established = self.establish(&provider).await;
        if self.attempt.get() != attempt {
            warn!("Wallet session ended while connecting");
            return Err(AtmError::ConnectionDenied(
                "wallet disconnected while connecting".to_string(),
            ));
        }

        match established {
            Ok((account, contract)) => {
                info!(account = %account, "Wallet connected");
                self.set_state(SessionState::Connected {
                    account: account.clone(),
                    contract,
                });
                Ok(account)
            }
            Err(e) => {
                warn!(error = %e, "Wallet connection failed");
                self.set_state(SessionState::Disconnected);
                Err(e)
            }
        }
    }

    /// Next provider notification; `None` once the provider is gone.
    pub async fn next_event(&self) -> Option<ProviderEvent> {
        self.events.recv().await.ok()
    }

    /// Next already-delivered notification, without waiting.
    pub fn try_next_event(&self) -> Option<ProviderEvent> {
        self.events.try_recv().ok()
    }

    pub async fn apply_event(&self, event: ProviderEvent) -> Result<SessionChange> {
        debug!(?event, "Applying provider event");
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts).await,
            ProviderEvent::ChainChanged(chain_id) => self.on_chain_changed(chain_id).await,
            ProviderEvent::Disconnected => Ok(self.end_session("provider disconnected")),
        }
    }

    async fn on_accounts_changed(&self, accounts: Vec<AccountAddress>) -> Result<SessionChange> {
        let Some(next) = accounts.into_iter().next() else {
            return Ok(self.end_session("wallet returned no accounts"));
        };

        let Some((current, contract)) = self.connected() else {
            debug!("Ignoring account change outside a session");
            return Ok(SessionChange::Unchanged);
        };

        if next == current {
            return Ok(SessionChange::Unchanged);
        }

        let contract = if contract.account() == &next {
            contract
        } else {
            self.rebind().await?
        };

        if self.connected().is_none() {
            return Ok(SessionChange::Unchanged);
        }

        info!(account = %next, "Wallet account changed");
        self.set_state(SessionState::Connected {
            account: next.clone(),
            contract,
        });
        Ok(SessionChange::AccountChanged(next))
    }

    async fn on_chain_changed(&self, chain_id: String) -> Result<SessionChange> {
        *self.chain_id.borrow_mut() = Some(chain_id.clone());

        if self.connected().is_none() {
            return Ok(SessionChange::Unchanged);
        }

        let contract = self.rebind().await?;

        let Some((account, _)) = self.connected() else {
            return Ok(SessionChange::Unchanged);
        };

        info!(chain_id = %chain_id, "Wallet chain changed");
        self.set_state(SessionState::Connected { account, contract });
        Ok(SessionChange::ChainChanged(chain_id))
    }

    /// Back to `Disconnected` from `Connecting` or `Connected`.
    fn end_session(&self, reason: &str) -> SessionChange {
        let active = matches!(
            &*self.state.borrow(),
            SessionState::Connecting | SessionState::Connected { .. }
        );
        if !active {
            return SessionChange::Unchanged;
        }

        info!(reason, "Wallet session ended");
        self.next_attempt();
        self.set_state(SessionState::Disconnected);
        SessionChange::Disconnected
    }

    async fn establish(&self, provider: &Rc<dyn WalletProvider>) -> Result<(AccountAddress, Rc<AtmContract>)> {
        let accounts = provider
            .request_accounts()
            .await
            .map_err(|e| AtmError::ConnectionDenied(e.to_string()))?;

        let account = accounts
            .into_iter()
            .next()
            .ok_or_else(|| AtmError::ConnectionDenied("no accounts returned".to_string()))?;

        let contract = self.bind(provider).await?;

        match provider.chain_id().await {
            Ok(chain_id) => *self.chain_id.borrow_mut() = Some(chain_id),
            Err(e) => debug!(error = %e, "Chain id unavailable"),
        }

        Ok((account, contract))
    }

    /// Rebuild the contract handle for the wallet's current signer. A failure
    /// ends the session.
    async fn rebind(&self) -> Result<Rc<AtmContract>> {
        let provider = self.gateway.provider()?;
        match self.bind(&provider).await {
            Ok(contract) => Ok(contract),
            Err(e) => {
                self.end_session("signer unavailable");
                Err(e)
            }
        }
    }

    async fn bind(&self, provider: &Rc<dyn WalletProvider>) -> Result<Rc<AtmContract>> {
        let signer = provider
            .signer()
            .await
            .map_err(|e| AtmError::ConnectionDenied(e.to_string()))?;

        AtmContract::bind(self.contract_address.clone(), &self.abi, signer)
            .map(Rc::new)
            .map_err(|e| AtmError::Config(e.to_string()))
    }

    fn connected(&self) -> Option<(AccountAddress, Rc<AtmContract>)> {
        match &*self.state.borrow() {
            SessionState::Connected { account, contract } => Some((account.clone(), contract.clone())),
            _ => None,
        }
    }

    fn next_attempt(&self) -> u64 {
        let attempt = self.attempt.get() + 1;
        self.attempt.set(attempt);
        attempt
    }

    fn set_state(&self, state: SessionState) {
        *self.state.borrow_mut() = state;
    }
}
