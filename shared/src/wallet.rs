//! # Connection Acquirer
//!
//! Turns the injected wallet into a read-only [`Provider`] or a
//! write-capable [`Signer`], refusing any chain other than the configured one.
//!
//! The first `eth_requestAccounts` opens the wallet's connect popup; once the
//! site is authorized later calls return immediately, so acquiring a fresh
//! connection per operation is cheap.

use serde_json::{json, Value};

use crate::abi::parse_quantity;
use crate::config::DappConfig;
use crate::error::{DappError, Result};
use crate::host::Host;

/// Read-only handle: the wallet is connected and on the right chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Provider {
    pub chain_id: u64,
    pub accounts: Vec<String>,
}

/// Write-capable handle bound to one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signer {
    pub provider: Provider,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Connection {
    Provider(Provider),
    Signer(Signer),
}

impl Connection {
    pub fn provider(&self) -> &Provider {
        match self {
            Connection::Provider(provider) => provider,
            Connection::Signer(signer) => &signer.provider,
        }
    }

    pub fn signer(&self) -> Option<&Signer> {
        match self {
            Connection::Signer(signer) => Some(signer),
            Connection::Provider(_) => None,
        }
    }
}

/// Connect the wallet and check its network.
///
/// On a chain mismatch the user is alerted and
/// [`DappError::WrongNetwork`] is returned; no handle escapes.
pub async fn get_provider_or_signer<H: Host>(
    host: &H,
    config: &DappConfig,
    need_signer: bool,
) -> Result<Connection> {
    let accounts = request_accounts(host).await?;

    let chain = host.request("eth_chainId", json!([])).await?;
    let chain_id = chain
        .as_str()
        .ok_or_else(|| DappError::Decode(format!("eth_chainId returned {}", chain)))
        .and_then(parse_quantity)?;

    if chain_id != config.chain_id {
        log::warn!(
            "Wallet is on chain {}, expected {} ({})",
            chain_id,
            config.chain_id,
            config.network_name
        );
        host.alert(&config.wrong_network_message());
        return Err(DappError::WrongNetwork {
            expected: config.chain_id,
            actual: chain_id,
        });
    }

    let provider = Provider { chain_id, accounts };
    if !need_signer {
        return Ok(Connection::Provider(provider));
    }

    let address = provider.accounts.first().cloned().ok_or(DappError::NoAccount)?;
    Ok(Connection::Signer(Signer { provider, address }))
}

async fn request_accounts<H: Host>(host: &H) -> Result<Vec<String>> {
    let value = host.request("eth_requestAccounts", json!([])).await?;
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()),
        other => Err(DappError::Decode(format!("eth_requestAccounts returned {}", other))),
    }
}
