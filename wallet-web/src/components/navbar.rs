//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;
use shared::{truncate_address, SessionStatus};

use crate::state::atm::use_atm_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_atm_context();
    let badge = move || {
        ctx.view.with(|v| match (v.status, v.account.as_deref()) {
            (SessionStatus::Connected, Some(account)) => truncate_address(account),
            (SessionStatus::Connecting, _) => "connecting".to_string(),
            (SessionStatus::NoProvider, _) => "no wallet".to_string(),
            _ => "not connected".to_string(),
        })
    };

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"ATM"</span>
                </A>
                <div style="display: flex; gap: 16px; align-items: center;">
                    <A href="/about" attr:class="nav-link-clean">"About"</A>
                    <span class="nav-badge">{badge}</span>
                </div>
            </div>
        </nav>
    }
}
