//! Render selection: which control the page shows for a given state.

use crate::state::DappState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presentation {
    ConnectWallet,
    Loading,
    StartPresale,
    PresaleNotStarted,
    PresaleMint,
    PublicMint,
}

/// Pick the presentation for `state`, first match wins:
///
/// 1. wallet not connected
/// 2. transaction in flight
/// 3. owner, presale not started
/// 4. presale not started
/// 5. presale running
/// 6. presale over
///
/// `None` cannot happen for a consistent state; callers render nothing.
pub fn select_presentation(state: &DappState) -> Option<Presentation> {
    if !state.wallet_connected {
        return Some(Presentation::ConnectWallet);
    }
    if state.loading {
        return Some(Presentation::Loading);
    }
    if state.is_owner && !state.presale_started {
        return Some(Presentation::StartPresale);
    }
    if !state.presale_started {
        return Some(Presentation::PresaleNotStarted);
    }
    if state.presale_started && !state.presale_ended {
        return Some(Presentation::PresaleMint);
    }
    if state.presale_started && state.presale_ended {
        return Some(Presentation::PublicMint);
    }
    None
}
