//! # Balance Cache
//!
//! Last balance read from the contract plus a freshness flag. Only a fresh value
//! may be shown as a number; while stale the page shows "updating" (with the
//! last known value, if any, for context).
//!
//! Reads that started before an invalidation are discarded when they land, so a
//! slow `getBalance` for the previous account cannot overwrite the new one.

use std::cell::Cell;

use lib_core::Result;
use shared::BalanceView;
use tracing::{debug, warn};

use crate::contract::AtmContract;
use crate::facade::ContractFacade;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Fresh,
    Stale,
}

#[derive(Debug)]
pub struct BalanceCache {
    value: Cell<Option<u64>>,
    staleness: Cell<Staleness>,
    generation: Cell<u64>,
}

impl Default for BalanceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceCache {
    pub fn new() -> Self {
        Self {
            value: Cell::new(None),
            staleness: Cell::new(Staleness::Stale),
            generation: Cell::new(0),
        }
    }

    /// Last value read, fresh or not.
    pub fn value(&self) -> Option<u64> {
        self.value.get()
    }

    pub fn staleness(&self) -> Staleness {
        self.staleness.get()
    }

    /// The value, only if it can be trusted.
    pub fn fresh_value(&self) -> Option<u64> {
        match self.staleness.get() {
            Staleness::Fresh => self.value.get(),
            Staleness::Stale => None,
        }
    }

    /// Mark stale, keeping the last value for display.
    pub fn invalidate(&self) {
        self.staleness.set(Staleness::Stale);
        self.generation.set(self.generation.get() + 1);
    }

    /// Forget the value entirely (session ended).
    pub fn clear(&self) {
        self.value.set(None);
        self.invalidate();
    }

    /// Read the balance and, unless invalidated meanwhile, store it as fresh.
    ///
    /// On failure the previous value is kept and the cache stays stale.
    pub async fn refresh(&self, facade: &ContractFacade, contract: &AtmContract) -> Result<u64> {
        let started = self.generation.get();

        match facade.get_balance(contract).await {
            Ok(value) => {
                if self.generation.get() == started {
                    self.value.set(Some(value));
                    self.staleness.set(Staleness::Fresh);
                    debug!(balance = value, "Balance refreshed");
                } else {
                    debug!(balance = value, "Discarding balance read superseded by an invalidation");
                }
                Ok(value)
            }
            Err(e) => {
                warn!(error = %e, "Balance refresh failed, keeping stale value");
                self.staleness.set(Staleness::Stale);
                Err(e)
            }
        }
    }

    pub fn view(&self) -> BalanceView {
        match (self.staleness.get(), self.value.get()) {
            (_, None) => BalanceView::Unknown,
            (Staleness::Fresh, Some(value)) => BalanceView::Fresh { value },
            (Staleness::Stale, last) => BalanceView::Updating { last },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeChain, ALICE};

    #[test]
    fn test_new_cache_is_unknown() {
        let cache = BalanceCache::new();
        assert_eq!(cache.view(), BalanceView::Unknown);
        assert_eq!(cache.fresh_value(), None);
    }

    #[tokio::test]
    async fn test_refresh_then_invalidate() {
        let chain = FakeChain::new(4);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let cache = BalanceCache::new();

        assert_eq!(cache.refresh(&facade, &contract).await, Ok(4));
        assert_eq!(cache.view(), BalanceView::Fresh { value: 4 });

        cache.invalidate();
        assert_eq!(cache.fresh_value(), None);
        assert_eq!(cache.view(), BalanceView::Updating { last: Some(4) });
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_value() {
        let chain = FakeChain::new(4);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let cache = BalanceCache::new();
        cache.refresh(&facade, &contract).await.unwrap();

        chain.fail_reads.set(true);
        chain.set_balance(9);
        assert!(cache.refresh(&facade, &contract).await.is_err());
        assert_eq!(cache.staleness(), Staleness::Stale);
        assert_eq!(cache.value(), Some(4));
    }

    #[tokio::test]
    async fn test_read_superseded_by_invalidation_is_dropped() {
        let chain = FakeChain::new(4);
        let contract = chain.contract_for(ALICE);
        let facade = ContractFacade::new();
        let cache = BalanceCache::new();
        let release = chain.hold_next_read();

        let (read, _) = futures::join!(cache.refresh(&facade, &contract), async {
            cache.invalidate();
            let _ = release.send(());
        });

        assert_eq!(read, Ok(4));
        assert_eq!(cache.staleness(), Staleness::Stale);
        assert_eq!(cache.value(), None);
    }

    #[test]
    fn test_clear_forgets_value() {
        let cache = BalanceCache::new();
        cache.value.set(Some(2));
        cache.staleness.set(Staleness::Fresh);

        cache.clear();
        assert_eq!(cache.value(), None);
        assert_eq!(cache.view(), BalanceView::Unknown);
    }
}
