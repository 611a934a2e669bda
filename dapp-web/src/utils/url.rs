//! Config overrides from the page URL
//!
//! `?contract=0x...&chain_id=11155111&network=Sepolia` points the page at a
//! different deployment without a rebuild. Overrides are validated as a whole;
//! an invalid set is logged and the build-time config is kept.

use shared::config::DappConfig;
use shared::error::{DappError, Result};
use web_sys::window;

use crate::utils::constants::{CHAIN_ID_PARAM, CONTRACT_PARAM, NETWORK_PARAM};

/// Split a `?a=1&b` search string into decoded pairs.
pub fn parse_query(search: &str) -> Vec<(String, String)> {
    let query_string = search.strip_prefix('?').unwrap_or(search);

    query_string
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let decoded = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            (key.to_string(), decoded)
        })
        .collect()
}

/// Apply recognised overrides on top of `base`.
pub fn apply_overrides(base: &DappConfig, params: &[(String, String)]) -> Result<DappConfig> {
    let mut config = base.clone();
    for (key, value) in params {
        match key.as_str() {
            CONTRACT_PARAM => config.contract_address = value.clone(),
            CHAIN_ID_PARAM => {
                config.chain_id = value
                    .parse()
                    .map_err(|_| DappError::Config(format!("{}={:?} is not a number", key, value)))?;
            }
            NETWORK_PARAM => config.network_name = value.clone(),
            _ => {}
        }
    }
    config.validate()?;
    Ok(config)
}

/// Build-time config with any URL overrides applied.
pub fn resolve_config() -> DappConfig {
    let base = DappConfig::default();
    let search = window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    let params = parse_query(&search);

    let config = match apply_overrides(&base, &params) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring URL config overrides: {}", e);
            base
        }
    };
    if config.is_placeholder_address() {
        log::warn!("No contract address configured; set NFT_CONTRACT_ADDRESS or ?contract=");
    }
    config
}
