//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;
use shared::utils::truncate_address;

use crate::state::dapp::use_dapp_context;
use crate::utils::constants::COLLECTION_NAME;

#[component]
pub fn Navbar() -> impl IntoView {
    let dapp_ctx = use_dapp_context();

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/">
                    <span class="nav-title">{COLLECTION_NAME}</span>
                </A>
                <span class="nav-account">
                    {move || dapp_ctx.account().map(|account| truncate_address(&account))}
                </span>
            </div>
        </nav>
    }
}
