//! Injected Ethereum Provider via wasm-bindgen
//!
//! Bridges the dapp core's [`Host`] trait to the browser: EIP-1193 requests
//! go to `window.ethereum`, alerts to `window.alert`, timers to
//! `gloo-timers` and the clock to `Date.now()`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::error::{DappError, Result};
use shared::host::Host;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = "
export function hasInjectedProvider() {
    return typeof window.ethereum !== 'undefined' && window.ethereum !== null;
}

export async function ethRequest(method, params) {
    if (!window.ethereum) {
        throw { code: null, message: 'No injected wallet found' };
    }
    try {
        return await window.ethereum.request({ method: method, params: params });
    } catch (error) {
        // Normalize to { code, message } so Rust can classify the failure
        const code = error && typeof error.code === 'number' ? error.code : null;
        const message = error && error.message ? error.message : String(error);
        throw { code: code, message: message };
    }
}
")]
extern "C" {
    #[wasm_bindgen(js_name = hasInjectedProvider)]
    fn has_injected_provider() -> bool;

    /// One `window.ethereum.request({ method, params })`
    #[wasm_bindgen(js_name = ethRequest, catch)]
    async fn eth_request(method: &str, params: JsValue) -> std::result::Result<JsValue, JsValue>;
}

/// Error shape thrown by `ethRequest`.
#[derive(Debug, Deserialize)]
struct ProviderError {
    code: Option<i64>,
    message: String,
}

fn provider_error(err: JsValue) -> DappError {
    match serde_wasm_bindgen::from_value::<ProviderError>(err.clone()) {
        Ok(e) => DappError::from_rpc(e.code, e.message),
        Err(_) => DappError::Rpc {
            code: None,
            message: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
        },
    }
}

/// The page's browser environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

impl BrowserHost {
    pub fn wallet_installed(&self) -> bool {
        has_injected_provider()
    }
}

#[async_trait(?Send)]
impl Host for BrowserHost {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        if !has_injected_provider() {
            return Err(DappError::NoWallet);
        }

        // Plain JS objects, not Maps, for the provider
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_params = params
            .serialize(&serializer)
            .map_err(|e| DappError::Rpc { code: None, message: e.to_string() })?;

        log::debug!("-> {}", method);
        let result = eth_request(method, js_params).await.map_err(provider_error)?;

        serde_wasm_bindgen::from_value::<Value>(result)
            .map_err(|e| DappError::Decode(format!("{} result: {}", method, e)))
    }

    fn alert(&self, message: &str) {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::warn!("Could not show alert: {}", message);
        }
    }

    async fn sleep(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }

    fn now_unix(&self) -> u64 {
        (js_sys::Date::now() / 1000.0) as u64
    }
}
