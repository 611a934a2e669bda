//! # Crypto Devs Dapp Core
//!
//! Everything the minting page does that does not need a browser.
//!
//! ## Structure
//!
//! - **[`controller`]**: state readers, mutators, bootstrap and background timers
//! - **[`wallet`]**: connection acquirer with network validation
//! - **[`contract`]**: `eth_call` / `eth_sendTransaction` client for the NFT contract
//! - **[`abi`]**: selectors, word decoding, ether amounts
//! - **[`state`]**: the dapp state vector and its single update path
//! - **[`render`]**: which control the page shows
//! - **[`poll`]**: cancellable periodic tasks
//! - **[`host`]**: the seam to the browser (wallet provider, alerts, timers, clock)
//! - **[`config`]**, **[`error`]**, **[`utils`]**
//!
//! ## Usage in the Frontend
//!
//! ```rust,ignore
//! use shared::{config::DappConfig, controller::Dapp};
//!
//! let dapp = Dapp::new(BrowserHost, store, DappConfig::default());
//! leptos::task::spawn_local(async move { dapp.bootstrap().await });
//! ```

pub mod abi;
pub mod config;
pub mod contract;
pub mod controller;
pub mod error;
pub mod host;
pub mod poll;
pub mod render;
pub mod state;
pub mod utils;
pub mod wallet;

pub use config::DappConfig;
pub use controller::Dapp;
pub use error::{DappError, Result};
pub use host::Host;
pub use render::{select_presentation, Presentation};
pub use state::{Action, DappState, StateStore};
