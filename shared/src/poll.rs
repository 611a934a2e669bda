//! # Periodic Tasks
//!
//! Every background timer runs under a [`CancelToken`]. Tokens are owned by a
//! [`PollGuard`] which cancels them when dropped, so a timer can never
//! outlive the view that started it.

use std::future::Future;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Owns the tokens of running timers and cancels all of them on drop.
#[derive(Debug, Default)]
pub struct PollGuard {
    tokens: Vec<CancelToken>,
}

impl PollGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a token tied to this guard.
    pub fn token(&mut self) -> CancelToken {
        let token = CancelToken::new();
        self.tokens.push(token.clone());
        token
    }

    pub fn cancel(&self) {
        for token in &self.tokens {
            token.cancel();
        }
    }
}

impl Drop for PollGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Run `tick` every `period_ms` until it breaks or `token` is cancelled.
///
/// The first tick runs after one full period. Returns the number of ticks run.
pub async fn every<S, SFut, T, TFut>(token: &CancelToken, period_ms: u32, mut sleep: S, mut tick: T) -> u32
where
    S: FnMut(u32) -> SFut,
    SFut: Future<Output = ()>,
    T: FnMut() -> TFut,
    TFut: Future<Output = ControlFlow<()>>,
{
    let mut ticks = 0;
    loop {
        sleep(period_ms).await;
        if token.is_cancelled() {
            break;
        }
        ticks += 1;
        if tick().await.is_break() {
            break;
        }
    }
    ticks
}
