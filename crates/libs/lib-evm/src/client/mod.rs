//! # ATM Client
//!
//! Wires the session, contract facade, balance cache, planners and memo
//! recorder together and exposes one method per user intent. The page renders
//! [`AtmClient::view`] and never touches the components directly.
//!
//! ## Intents
//!
//! - [`connect`](AtmClient::connect): request accounts, bind the contract, read the balance
//! - [`deposit`](AtmClient::deposit) / [`withdraw`](AtmClient::withdraw): fixed amount, one at a time
//! - [`refresh_balance`](AtmClient::refresh_balance)
//! - [`compute_savings`](AtmClient::compute_savings) / [`compute_return`](AtmClient::compute_return):
//!   pure calculation, then a best-effort memo of the result
//!
//! Wallet notifications are applied by [`run_event_loop`](AtmClient::run_event_loop)
//! (or [`pump_events`](AtmClient::pump_events) when the caller drives it).
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_core::AtmConfig;
//! use lib_evm::{AtmClient, ProviderGateway};
//!
//! # async fn run() -> lib_core::Result<()> {
//! let client = AtmClient::new(AtmConfig::default(), ProviderGateway::detect(None))?;
//! client.connect().await?;
//! client.deposit().await?;
//! println!("{:?}", client.view().balance);
//! # Ok(())
//! # }
//! ```

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use lib_core::{compute_monthly_savings, compute_return, AtmConfig, AtmError, Result};
use shared::{
    AtmView, MemoOutcome, MemoView, ReturnEstimate, ReturnEstimateRequest, SavingsPlan,
    SavingsPlanRequest,
};
use tracing::{info, warn};

use crate::abi::{AbiDescriptor, AtmSelectors};
use crate::balance::BalanceCache;
use crate::facade::ContractFacade;
use crate::gateway::ProviderGateway;
use crate::memo::MemoRecorder;
use crate::provider::ProviderEvent;
use crate::session::{SessionChange, WalletSession};
use crate::types::{AccountAddress, TxReceipt};

/// Source of "now" for the savings planner.
pub type Clock = fn() -> DateTime<Utc>;

#[derive(Default)]
struct Results {
    savings: Option<SavingsPlan>,
    estimate: Option<ReturnEstimate>,
    memo: Option<MemoView>,
    last_error: Option<String>,
}

pub struct AtmClient {
    config: AtmConfig,
    session: WalletSession,
    facade: ContractFacade,
    balance: BalanceCache,
    memo: MemoRecorder,
    results: RefCell<Results>,
    clock: Clock,
}

impl AtmClient {
    /// Build the client. Fails if the configured ABI cannot be parsed or lacks
    /// one of the ATM calls.
    pub fn new(config: AtmConfig, gateway: ProviderGateway) -> Result<Self> {
        let abi = match &config.abi_json {
            Some(json) => AbiDescriptor::from_json(json),
            None => AbiDescriptor::atm_default(),
        }
        .map_err(|e| AtmError::Config(e.to_string()))?;
        AtmSelectors::from_abi(&abi).map_err(|e| AtmError::Config(e.to_string()))?;

        let session = WalletSession::new(gateway, config.contract_address.clone(), abi);
        let memo = MemoRecorder::new(config.memo_value_wei);

        Ok(Self {
            config,
            session,
            facade: ContractFacade::new(),
            balance: BalanceCache::new(),
            memo,
            results: RefCell::new(Results::default()),
            clock: Utc::now,
        })
    }

    /// Replace the wall clock used by the savings planner.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &AtmConfig {
        &self.config
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn balance(&self) -> &BalanceCache {
        &self.balance
    }

    /// Snapshot of everything the page renders.
    pub fn view(&self) -> AtmView {
        let results = self.results.borrow();
        AtmView {
            status: self.session.status(),
            account: self.session.account().map(|a| a.to_string()),
            chain_id: self.session.chain_id(),
            balance: self.balance.view(),
            pending: self.facade.pending().map(|p| p.to_view()),
            savings: results.savings.clone(),
            estimate: results.estimate.clone(),
            memo: results.memo.clone(),
            last_error: results.last_error.clone(),
        }
    }

    pub async fn connect(&self) -> Result<AccountAddress> {
        let account = self.track(self.session.connect().await)?;
        if let Err(e) = self.refresh_balance().await {
            warn!(error = %e, "Initial balance read failed");
        }
        Ok(account)
    }

    pub async fn refresh_balance(&self) -> Result<u64> {
        let contract = self.session.contract()?;
        self.balance.refresh(&self.facade, &contract).await
    }

    /// Deposit the configured fixed amount.
    pub async fn deposit(&self) -> Result<TxReceipt> {
        let result = match self.session.contract() {
            Ok(contract) => {
                self.facade
                    .deposit(&contract, self.config.fixed_amount, &self.balance)
                    .await
            }
            Err(e) => Err(e),
        };
        self.track(result)
    }

    /// Withdraw the configured fixed amount.
    pub async fn withdraw(&self) -> Result<TxReceipt> {
        let result = match self.session.contract() {
            Ok(contract) => {
                self.facade
                    .withdraw(&contract, self.config.fixed_amount, &self.balance)
                    .await
            }
            Err(e) => Err(e),
        };
        self.track(result)
    }

    /// Compute the monthly savings plan, then record its summary on-chain.
    ///
    /// The plan is returned even if the memo fails; the memo outcome shows up
    /// in [`AtmView::memo`].
    pub async fn compute_savings(&self, request: &SavingsPlanRequest) -> Result<SavingsPlan> {
        let plan = self.track(compute_monthly_savings(request, (self.clock)()).map_err(AtmError::from))?;
        info!(monthly = plan.monthly_amount, months = plan.months, "Savings plan computed");

        self.results.borrow_mut().savings = Some(plan.clone());
        self.record_memo(plan.summary()).await;
        Ok(plan)
    }

    /// Estimate the investment return, then record its summary on-chain.
    pub async fn compute_return(&self, request: &ReturnEstimateRequest) -> Result<ReturnEstimate> {
        let estimate = self.track(compute_return(request).map_err(AtmError::from))?;
        info!(kind = %estimate.investment_type, value = estimate.projected_value, "Return estimated");

        self.results.borrow_mut().estimate = Some(estimate.clone());
        self.record_memo(estimate.summary()).await;
        Ok(estimate)
    }

    /// Apply every notification already delivered. Returns how many were applied.
    pub async fn pump_events(&self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.session.try_next_event() {
            self.handle_event(event).await;
            applied += 1;
        }
        applied
    }

    /// Wait for the next notification and apply it. `false` once the
    /// provider is gone.
    pub async fn process_next_event(&self) -> bool {
        match self.session.next_event().await {
            Some(event) => {
                self.handle_event(event).await;
                true
            }
            None => {
                info!("Provider event stream closed");
                false
            }
        }
    }

    /// Apply notifications as they arrive, until the provider goes away.
    pub async fn run_event_loop(&self) {
        while self.process_next_event().await {}
    }

    async fn handle_event(&self, event: ProviderEvent) {
        match self.session.apply_event(event).await {
            Ok(SessionChange::AccountChanged(_)) | Ok(SessionChange::ChainChanged(_)) => {
                self.balance.invalidate();
                if let Err(e) = self.refresh_balance().await {
                    warn!(error = %e, "Balance read after wallet change failed");
                }
            }
            Ok(SessionChange::Disconnected) => self.balance.clear(),
            Ok(SessionChange::Unchanged) => {}
            Err(e) => {
                self.balance.clear();
                self.results.borrow_mut().last_error = Some(e.user_message());
            }
        }
    }

    async fn record_memo(&self, message: String) {
        let outcome = match self.session.contract() {
            Ok(contract) => {
                self.set_memo(&message, MemoOutcome::Pending);
                match self.memo.record(&self.facade, &contract, &message).await {
                    Ok(receipt) => MemoOutcome::Recorded {
                        hash: receipt.hash.to_string(),
                    },
                    Err(e) => MemoOutcome::Failed {
                        reason: e.to_string(),
                    },
                }
            }
            Err(e) => {
                warn!(error = %e, "Memo skipped");
                MemoOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };
        self.set_memo(&message, outcome);
    }

    fn set_memo(&self, message: &str, outcome: MemoOutcome) {
        self.results.borrow_mut().memo = Some(MemoView {
            message: message.to_string(),
            outcome,
        });
    }

    /// Remember the outcome of an intent for the page.
    fn track<T>(&self, result: Result<T>) -> Result<T> {
        let mut results = self.results.borrow_mut();
        match &result {
            Ok(_) => results.last_error = None,
            Err(e) => {
                warn!(code = e.code(), error = %e, "Operation failed");
                results.last_error = Some(e.user_message());
            }
        }
        drop(results);
        result
    }
}
