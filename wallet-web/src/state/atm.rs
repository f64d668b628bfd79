//! ATM state management
//!
//! The page keeps one [`AtmClient`] for its lifetime and mirrors the client's
//! [`AtmView`] into a signal. Intents run as local tasks; while one runs the
//! view is republished periodically so "connecting", "updating" and the pending
//! transaction show up without waiting for the intent to finish.

use std::future::Future;
use std::rc::Rc;

use futures::future::select;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use lib_evm::AtmClient;
use shared::AtmView;

use crate::utils::constants::VIEW_REFRESH_MS;

/// Global ATM context
#[derive(Clone, Copy)]
pub struct AtmContext {
    pub view: RwSignal<AtmView>,
    client: StoredValue<Rc<AtmClient>, LocalStorage>,
}

impl AtmContext {
    pub fn new(client: AtmClient) -> Self {
        Self {
            view: RwSignal::new(client.view()),
            client: StoredValue::new_local(Rc::new(client)),
        }
    }

    pub fn client(&self) -> Rc<AtmClient> {
        self.client.get_value()
    }

    /// Publish the client's current view.
    pub fn sync(&self) {
        self.view.set(self.client().view());
    }

    /// Run `intent` in the background, republishing the view while it runs
    /// and once more when it finishes.
    pub fn run<F, Fut>(&self, intent: F)
    where
        F: FnOnce(Rc<AtmClient>) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let ctx = *self;
        let work = intent(self.client());

        spawn_local(async move {
            let work = Box::pin(work);
            let ticker = Box::pin(async move {
                loop {
                    ctx.sync();
                    TimeoutFuture::new(VIEW_REFRESH_MS).await;
                }
            });

            // The ticker never finishes; this resolves with the intent
            let _ = select(work, ticker).await;
            ctx.sync();
        });
    }

    /// Apply wallet notifications (account, chain, disconnect) for the page lifetime.
    pub fn spawn_event_loop(&self) {
        let ctx = *self;
        let client = self.client();

        spawn_local(async move {
            while client.process_next_event().await {
                ctx.sync();
            }
            log::info!("Wallet event loop finished");
        });
    }
}

pub fn provide_atm_context(client: AtmClient) -> AtmContext {
    let context = AtmContext::new(client);
    provide_context(context);
    context
}

pub fn use_atm_context() -> AtmContext {
    expect_context::<AtmContext>()
}
