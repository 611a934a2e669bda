//! # Dapp Configuration
//!
//! Build-time defaults for the contract the page talks to. The contract
//! address comes from `NFT_CONTRACT_ADDRESS` at compile time; the web crate
//! may override the address and chain id from the page URL.
//!
//! ```rust
//! use shared::config::DappConfig;
//!
//! let config = DappConfig::default();
//! assert_eq!(config.chain_id, 5);
//! assert_eq!(config.mint_price_ether, "0.01");
//! ```

use crate::abi::{is_address, parse_ether};
use crate::error::{DappError, Result};

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Goerli
pub const DEFAULT_CHAIN_ID: u64 = 5;
pub const DEFAULT_NETWORK_NAME: &str = "Goerli";
pub const DEFAULT_MINT_PRICE_ETHER: &str = "0.01";
pub const DEFAULT_MAX_SUPPLY: u32 = 20;
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 5_000;
pub const DEFAULT_RECEIPT_POLL_MS: u32 = 2_000;
pub const DEFAULT_RECEIPT_MAX_ATTEMPTS: u32 = 300;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DappConfig {
    /// Deployed NFT contract
    pub contract_address: String,

    /// The only chain id the page accepts
    pub chain_id: u64,

    /// Shown in the wrong-network alert
    pub network_name: String,

    /// Price sent with `presaleMint()` and `mint()`
    pub mint_price_ether: String,

    pub max_supply: u32,

    /// Period of both background timers
    pub poll_interval_ms: u32,

    /// Delay between `eth_getTransactionReceipt` polls
    pub receipt_poll_ms: u32,

    /// Receipt polls before a transaction is reported as timed out
    pub receipt_max_attempts: u32,
}

impl Default for DappConfig {
    fn default() -> Self {
        Self {
            contract_address: option_env!("NFT_CONTRACT_ADDRESS")
                .unwrap_or(ZERO_ADDRESS)
                .to_string(),
            chain_id: DEFAULT_CHAIN_ID,
            network_name: DEFAULT_NETWORK_NAME.to_string(),
            mint_price_ether: DEFAULT_MINT_PRICE_ETHER.to_string(),
            max_supply: DEFAULT_MAX_SUPPLY,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            receipt_poll_ms: DEFAULT_RECEIPT_POLL_MS,
            receipt_max_attempts: DEFAULT_RECEIPT_MAX_ATTEMPTS,
        }
    }
}

impl DappConfig {
    /// Check the values the dapp cannot run without.
    pub fn validate(&self) -> Result<()> {
        if !is_address(&self.contract_address) {
            return Err(DappError::Config(format!(
                "contract address {:?} is not a 20-byte hex address",
                self.contract_address
            )));
        }
        if self.chain_id == 0 {
            return Err(DappError::Config("chain id must be non-zero".to_string()));
        }
        parse_ether(&self.mint_price_ether)
            .map_err(|e| DappError::Config(format!("mint price: {}", e)))?;
        if self.poll_interval_ms == 0 || self.receipt_poll_ms == 0 || self.receipt_max_attempts == 0 {
            return Err(DappError::Config("poll intervals and attempts must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Mint price in wei.
    pub fn mint_price_wei(&self) -> Result<u128> {
        parse_ether(&self.mint_price_ether)
    }

    /// Alert text for a wallet on the wrong chain.
    pub fn wrong_network_message(&self) -> String {
        format!("Change the network to {}", self.network_name)
    }

    pub fn is_placeholder_address(&self) -> bool {
        self.contract_address.eq_ignore_ascii_case(ZERO_ADDRESS)
    }
}
