//! Mint Panel Component
//!
//! Shows exactly one control, chosen by [`select_presentation`].

use leptos::prelude::*;
use leptos::task::spawn_local;
use shared::render::{select_presentation, Presentation};
use shared::utils::format_deadline;

use crate::state::dapp::{use_dapp, use_dapp_context, PageDapp};

/// What a button asks the controller to do.
#[derive(Clone, Copy, Debug)]
enum Intent {
    Connect,
    StartPresale,
    PresaleMint,
    PublicMint,
}

fn run(dapp: PageDapp, intent: Intent) {
    log::info!("{:?} clicked", intent);
    spawn_local(async move {
        match intent {
            Intent::Connect => dapp.connect_wallet().await,
            Intent::StartPresale => dapp.start_presale().await,
            Intent::PresaleMint => dapp.presale_mint().await,
            Intent::PublicMint => dapp.public_mint().await,
        }
    });
}

#[component]
pub fn MintPanel() -> impl IntoView {
    let dapp_ctx = use_dapp_context();
    let dapp = use_dapp();

    view! {
        <div class="mint-panel">
            {move || {
                let state = dapp_ctx.state.get();
                let dapp = dapp.clone();
                match select_presentation(&state) {
                    Some(Presentation::ConnectWallet) => view! {
                        <button class="button" on:click=move |_| run(dapp.clone(), Intent::Connect)>
                            "Connect your wallet"
                        </button>
                    }.into_any(),
                    Some(Presentation::Loading) => view! {
                        <button class="button" disabled=true>"Loading..."</button>
                    }.into_any(),
                    Some(Presentation::StartPresale) => view! {
                        <button class="button" on:click=move |_| run(dapp.clone(), Intent::StartPresale)>
                            "Start Presale!"
                        </button>
                    }.into_any(),
                    Some(Presentation::PresaleNotStarted) => view! {
                        <div>
                            <div class="description">"Presale hasnt started!"</div>
                        </div>
                    }.into_any(),
                    Some(Presentation::PresaleMint) => {
                        let deadline = state
                            .presale_ends_at
                            .and_then(format_deadline)
                            .map(|when| format!("Presale ends {}", when));
                        view! {
                            <div>
                                <div class="description">
                                    "Presale has started!!! If your address is whitelisted, Mint a Crypto Dev 🥳"
                                </div>
                                {deadline.map(|text| view! { <div class="deadline">{text}</div> })}
                                <button class="button" on:click=move |_| run(dapp.clone(), Intent::PresaleMint)>
                                    "Presale Mint 🚀"
                                </button>
                            </div>
                        }.into_any()
                    }
                    Some(Presentation::PublicMint) => view! {
                        <button class="button" on:click=move |_| run(dapp.clone(), Intent::PublicMint)>
                            "Public Mint 🚀"
                        </button>
                    }.into_any(),
                    None => ().into_any(),
                }
            }}
        </div>
    }
}
