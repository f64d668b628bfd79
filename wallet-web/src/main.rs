//! ATM Wallet Page
//!
//! Browser front end for the ATM contract: MetaMask connection, deposit and
//! withdraw, and the savings / return planners.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Initialize logger (tracing events from lib-evm arrive through its `log` feature)
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("ATM wallet page starting...");

    if let Err(e) = lib_core::config::init_config() {
        log::error!("Configuration error: {}", e);
    }

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the loading screen element
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    let Some(loading_element) = document.get_element_by_id("leptos-loading") else {
        log::debug!("Loading element not found");
        return;
    };

    if let Some(html_element) = loading_element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.class_list().add_1("hidden") {
            log::warn!("Failed to add 'hidden' class: {:?}", e);
        }
    }
    loading_element.set_attribute("style", "display: none !important;").ok();
}
