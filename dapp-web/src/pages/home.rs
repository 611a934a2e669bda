//! Home Page - minted counter, mint controls and the background timers

use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::poll::PollGuard;
use shared::utils::format_minted;

use crate::components::MintPanel;
use crate::state::dapp::{use_dapp, use_dapp_context};
use crate::utils::constants::{COLLECTION_IMAGE, COLLECTION_NAME, COLLECTION_TAGLINE};

#[component]
pub fn HomePage() -> impl IntoView {
    let dapp_ctx = use_dapp_context();
    let dapp = use_dapp();
    let max_supply = dapp.config().max_supply;

    // Mount: connect, read everything once, then start both timers. The
    // guard cancels the timers when the page is torn down.
    if !dapp_ctx.state.with_untracked(|state| state.wallet_connected) {
        let mut guard = PollGuard::new();
        let presale_token = guard.token();
        let counter_token = guard.token();

        let mount_dapp = dapp.clone();
        spawn_local(async move {
            mount_dapp.bootstrap().await;

            let watcher = mount_dapp.clone();
            spawn_local(async move {
                watcher.watch_presale(&presale_token).await;
            });
            mount_dapp.watch_token_ids(&counter_token).await;
        });

        on_cleanup(move || {
            log::debug!("Home page unmounted, stopping timers");
            guard.cancel();
        });
    }

    let minted = move || format_minted(&dapp_ctx.token_ids_minted(), max_supply);

    view! {
        <div class="main">
            <div>
                <h1 class="title">{format!("Welcome to {}!", COLLECTION_NAME)}</h1>
                <div class="description">{COLLECTION_TAGLINE}</div>
                <div class="description">{minted}</div>
                <MintPanel/>
            </div>
            <div>
                <img class="image" src=COLLECTION_IMAGE alt=COLLECTION_NAME/>
            </div>
        </div>
        <footer class="footer">
            "Made with ❤ by Crypto Devs"
        </footer>
    }
}
