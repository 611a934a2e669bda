//! Crypto Devs Minting Dapp - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::Navbar;
use crate::pages::HomePage;
use crate::state::dapp::provide_dapp_context;
use crate::utils::url::resolve_config;

#[component]
pub fn App() -> impl IntoView {
    let config = resolve_config();
    log::info!(
        "Contract {} on chain {} ({})",
        config.contract_address,
        config.chain_id,
        config.network_name
    );

    let dapp = provide_dapp_context(config);
    if !dapp.host().wallet_installed() {
        log::warn!("No injected wallet detected; connecting will fail until one is installed");
    }

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=HomePage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="main">
            <div>
                <h1 class="title">"404 - Page Not Found"</h1>
                <p class="description">"The page you're looking for doesn't exist."</p>
                <A href="/">
                    <span class="button">"Go to Home"</span>
                </A>
            </div>
        </div>
    }
}
