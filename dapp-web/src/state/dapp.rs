//! Dapp state management

use leptos::prelude::*;
use shared::config::DappConfig;
use shared::controller::Dapp;
use shared::state::{Action, DappState, StateStore};

use crate::services::BrowserHost;

/// The controller as the page uses it.
pub type PageDapp = Dapp<BrowserHost, DappContext>;

/// Global dapp state, held in one signal
#[derive(Clone, Copy)]
pub struct DappContext {
    pub state: RwSignal<DappState>,
}

impl DappContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(DappState::default()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.with(|state| state.wallet_connected)
    }

    pub fn account(&self) -> Option<String> {
        self.state.with(|state| state.account.clone())
    }

    pub fn token_ids_minted(&self) -> String {
        self.state.with(|state| state.token_ids_minted.clone())
    }
}

impl Default for DappContext {
    fn default() -> Self {
        Self::new()
    }
}

// Every write goes through the reducer; signal updates are serialized by
// the reactive runtime.
impl StateStore for DappContext {
    fn dispatch(&self, action: Action) {
        log::debug!("dispatch {:?}", action);
        self.state.update(|state| state.apply(action));
    }

    fn snapshot(&self) -> DappState {
        self.state.get_untracked()
    }
}

pub fn provide_dapp_context(config: DappConfig) -> PageDapp {
    let context = DappContext::new();
    let dapp = Dapp::new(BrowserHost, context, config);
    provide_context(context);
    provide_context(dapp.clone());
    dapp
}

pub fn use_dapp_context() -> DappContext {
    expect_context::<DappContext>()
}

pub fn use_dapp() -> PageDapp {
    expect_context::<PageDapp>()
}
