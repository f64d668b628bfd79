//! ATM Wallet Web App - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{A, Route, Router, Routes},
    path,
};
use lib_core::config::try_core_config;
use lib_core::AtmConfig;
use lib_evm::{AtmClient, ProviderGateway};

use crate::components::Navbar;
use crate::pages::{AboutPage, AtmPage};
use crate::services::ethereum::Eip1193Provider;
use crate::state::atm::provide_atm_context;

#[component]
pub fn App() -> impl IntoView {
    let config = try_core_config().cloned().unwrap_or_else(|| {
        log::warn!("Configuration not initialized, using defaults");
        AtmConfig::default()
    });

    let gateway = ProviderGateway::detect(Eip1193Provider::detect());
    let client = match AtmClient::new(config, gateway) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to start ATM client: {}", e);
            return view! { <StartupError message=e.user_message()/> }.into_any();
        }
    };

    let ctx = provide_atm_context(client);
    ctx.spawn_event_loop();

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=AtmPage/>
                    <Route path=path!("/about") view=AboutPage/>
                </Routes>
            </div>
        </Router>
    }
    .into_any()
}

#[component]
fn StartupError(message: String) -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: 100vh;">
            <div class="card" style="max-width: 500px; text-align: center;">
                <p class="error-message">{message}</p>
            </div>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 style="margin-bottom: 16px; font-size: 32px; font-weight: 700;">"404 - Page Not Found"</h1>
                <p style="margin-bottom: 24px;">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="btn" style="margin-top: 20px; display: inline-block;">
                        "Go to the ATM"
                    </span>
                </A>
            </div>
        </div>
    }
}
