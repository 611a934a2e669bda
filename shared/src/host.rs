//! # Host Environment
//!
//! Everything the dapp needs from the page it runs in: the injected
//! EIP-1193 wallet provider, modal alerts, timers and the wall clock.
//! The browser build implements this over `window.ethereum`; tests use a
//! scripted host.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

#[async_trait(?Send)]
pub trait Host {
    /// Send one JSON-RPC request through the wallet provider.
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Show a blocking alert to the user.
    fn alert(&self, message: &str);

    /// Suspend the calling task for `millis`.
    async fn sleep(&self, millis: u32);

    /// Seconds since the unix epoch.
    fn now_unix(&self) -> u64;
}

#[async_trait(?Send)]
impl<H: Host + ?Sized> Host for &H {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        (**self).request(method, params).await
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    async fn sleep(&self, millis: u32) {
        (**self).sleep(millis).await
    }

    fn now_unix(&self) -> u64 {
        (**self).now_unix()
    }
}
