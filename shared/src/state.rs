//! # Dapp State
//!
//! The state vector that drives rendering, and the single update path into
//! it. Handlers and timers never write fields directly: they dispatch an
//! [`Action`] through a [`StateStore`], which applies it with
//! [`DappState::apply`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DappState {
    pub wallet_connected: bool,
    /// First account exposed by the wallet, if known
    pub account: Option<String>,
    pub presale_started: bool,
    pub presale_ended: bool,
    /// Raw `presaleEnded()` timestamp from the last successful read
    pub presale_ends_at: Option<u64>,
    /// True only while a transaction is awaiting confirmation
    pub loading: bool,
    pub is_owner: bool,
    /// Decimal count of minted tokens
    pub token_ids_minted: String,
}

impl Default for DappState {
    fn default() -> Self {
        Self {
            wallet_connected: false,
            account: None,
            presale_started: false,
            presale_ended: false,
            presale_ends_at: None,
            loading: false,
            is_owner: false,
            token_ids_minted: "0".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    WalletConnected { account: Option<String> },
    PresaleStarted(bool),
    PresaleEnded { ended: bool, ends_at: u64 },
    Loading(bool),
    IsOwner(bool),
    TokenIdsMinted(String),
}

impl DappState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::WalletConnected { account } => {
                self.wallet_connected = true;
                if account.is_some() {
                    self.account = account;
                }
            }
            Action::PresaleStarted(started) => self.presale_started = started,
            Action::PresaleEnded { ended, ends_at } => {
                self.presale_ended = ended;
                self.presale_ends_at = Some(ends_at);
            }
            Action::Loading(loading) => self.loading = loading,
            Action::IsOwner(is_owner) => self.is_owner = is_owner,
            Action::TokenIdsMinted(count) => self.token_ids_minted = count,
        }
    }
}

/// Owner of the live [`DappState`].
///
/// Implementations serialize `dispatch` calls; the browser build wraps a
/// reactive signal.
pub trait StateStore {
    fn dispatch(&self, action: Action);

    fn snapshot(&self) -> DappState;
}
