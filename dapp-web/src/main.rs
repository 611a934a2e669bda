//! Crypto Devs NFT minting page
//!
//! Connects the injected wallet, reads presale and mint state from the
//! contract, and offers the one mint control the current state allows.

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
use utils::constants::LOADING_ELEMENT_ID;

#[wasm_bindgen(start)]
pub fn main() {
    // Panic messages to the browser console
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Crypto Devs dapp starting...");

    hide_loading_screen();

    leptos::mount::mount_to_body(|| view! { <App/> });
}

/// Hide the static loading overlay from index.html
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No window or document available");
        return;
    };

    let Some(loading_element) = document.get_element_by_id(LOADING_ELEMENT_ID) else {
        log::warn!("Loading element #{} not found", LOADING_ELEMENT_ID);
        return;
    };

    if let Some(html_element) = loading_element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.class_list().add_1("hidden") {
            log::warn!("Failed to add 'hidden' class: {:?}", e);
        }
    }
    if let Err(e) = loading_element.set_attribute("style", "display: none !important;") {
        log::warn!("Failed to hide loading element: {:?}", e);
    }
}
