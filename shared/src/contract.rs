//! # NFT Contract Client
//!
//! A contract object bound to one address and one [`Connection`]. Reads go
//! through `eth_call`; writes through `eth_sendTransaction` and need a
//! signer connection.
//!
//! | Call              | Kind  | Result                |
//! |-------------------|-------|-----------------------|
//! | `presaleStarted()`| read  | `bool`                |
//! | `presaleEnded()`  | read  | unix seconds          |
//! | `owner()`         | read  | lowercase address     |
//! | `tokenIds()`      | read  | minted count          |
//! | `presaleMint()`   | write | tx hash (payable)     |
//! | `mint()`          | write | tx hash (payable)     |
//! | `startPresale()`  | write | tx hash               |

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::abi::{self, call_data, decode_address, decode_bool, decode_uint, parse_quantity, to_quantity};
use crate::config::DappConfig;
use crate::error::{DappError, Result};
use crate::host::Host;
use crate::wallet::Connection;

/// The part of a transaction receipt the dapp looks at.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    /// `0x1` success, `0x0` reverted
    #[serde(default)]
    pub status: Option<String>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => parse_quantity(status).map(|s| s == 1).unwrap_or(false),
            // pre-Byzantium receipts carry no status
            None => true,
        }
    }
}

pub struct NftContract<'a, H: Host> {
    host: &'a H,
    config: &'a DappConfig,
    connection: &'a Connection,
}

impl<'a, H: Host> NftContract<'a, H> {
    pub fn new(host: &'a H, config: &'a DappConfig, connection: &'a Connection) -> Self {
        Self {
            host,
            config,
            connection,
        }
    }

    pub async fn presale_started(&self) -> Result<bool> {
        decode_bool(&self.call(abi::PRESALE_STARTED).await?)
    }

    /// End of the presale, unix seconds.
    pub async fn presale_ended(&self) -> Result<u64> {
        let raw = decode_uint(&self.call(abi::PRESALE_ENDED).await?)?;
        u64::try_from(raw).map_err(|_| DappError::Decode(format!("timestamp {} out of range", raw)))
    }

    pub async fn owner(&self) -> Result<String> {
        decode_address(&self.call(abi::OWNER).await?)
    }

    pub async fn token_ids(&self) -> Result<u128> {
        decode_uint(&self.call(abi::TOKEN_IDS).await?)
    }

    /// Whitelisted mint during the presale. Returns the transaction hash.
    pub async fn presale_mint(&self, value_wei: u128) -> Result<String> {
        self.send(abi::PRESALE_MINT, Some(value_wei)).await
    }

    pub async fn mint(&self, value_wei: u128) -> Result<String> {
        self.send(abi::MINT, Some(value_wei)).await
    }

    pub async fn start_presale(&self) -> Result<String> {
        self.send(abi::START_PRESALE, None).await
    }

    /// Wait until `tx_hash` is mined.
    ///
    /// Polls the receipt every `receipt_poll_ms`, giving up after
    /// `receipt_max_attempts` polls.
    pub async fn wait(&self, tx_hash: &str) -> Result<Receipt> {
        for attempt in 1..=self.config.receipt_max_attempts {
            let value = self
                .host
                .request("eth_getTransactionReceipt", json!([tx_hash]))
                .await?;

            if !value.is_null() {
                let receipt: Receipt = serde_json::from_value(value)
                    .map_err(|e| DappError::Decode(format!("receipt for {}: {}", tx_hash, e)))?;
                if !receipt.succeeded() {
                    return Err(DappError::Reverted(tx_hash.to_string()));
                }
                log::debug!("{} mined after {} polls", tx_hash, attempt);
                return Ok(receipt);
            }

            self.host.sleep(self.config.receipt_poll_ms).await;
        }
        Err(DappError::Timeout(tx_hash.to_string()))
    }

    async fn call(&self, signature: &str) -> Result<String> {
        let params = json!([
            { "to": self.config.contract_address, "data": call_data(signature) },
            "latest"
        ]);
        let result = self.host.request("eth_call", params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DappError::Decode(format!("{} returned {}", signature, result)))
    }

    async fn send(&self, signature: &str, value_wei: Option<u128>) -> Result<String> {
        let signer = self.connection.signer().ok_or(DappError::ReadOnly)?;

        let mut tx = Map::new();
        tx.insert("from".into(), json!(signer.address));
        tx.insert("to".into(), json!(self.config.contract_address));
        tx.insert("data".into(), json!(call_data(signature)));
        if let Some(wei) = value_wei {
            tx.insert("value".into(), json!(to_quantity(wei)));
        }

        let result = self
            .host
            .request("eth_sendTransaction", json!([Value::Object(tx)]))
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| DappError::Decode(format!("{} returned {}", signature, result)))?;
        log::info!("Submitted {} as {}", signature, hash);
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{word_from_address, word_from_uint};
    use crate::host::mock::MockHost;
    use crate::wallet::{Provider, Signer};

    const ACCOUNT: &str = "0xabc0000000000000000000000000000000000001";
    const TX: &str = "0xfeed";

    fn provider() -> Connection {
        Connection::Provider(Provider { chain_id: 5, accounts: vec![ACCOUNT.to_string()] })
    }

    fn signer() -> Connection {
        Connection::Signer(Signer {
            provider: Provider { chain_id: 5, accounts: vec![ACCOUNT.to_string()] },
            address: ACCOUNT.to_string(),
        })
    }

    #[tokio::test]
    async fn test_reads_decode_words() {
        let host = MockHost::new();
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(1));
        host.call_returns(abi::PRESALE_ENDED, word_from_uint(1_700_000_600));
        host.call_returns(abi::OWNER, word_from_address("0xABC0000000000000000000000000000000000001"));
        host.call_returns(abi::TOKEN_IDS, word_from_uint(12));

        let config = DappConfig::default();
        let connection = provider();
        let contract = NftContract::new(&host, &config, &connection);

        assert!(contract.presale_started().await.unwrap());
        assert_eq!(contract.presale_ended().await.unwrap(), 1_700_000_600);
        assert_eq!(contract.owner().await.unwrap(), ACCOUNT);
        assert_eq!(contract.token_ids().await.unwrap(), 12);

        let calls = host.calls();
        let (method, params) = &calls[0];
        assert_eq!(method, "eth_call");
        assert_eq!(params[0]["to"], json!(config.contract_address));
        assert_eq!(params[1], json!("latest"));
    }

    #[tokio::test]
    async fn test_mint_sends_fixed_payment() {
        let host = MockHost::new();
        host.respond("eth_sendTransaction", Ok(json!(TX)));

        let config = DappConfig::default();
        let connection = signer();
        let contract = NftContract::new(&host, &config, &connection);

        let hash = contract.mint(config.mint_price_wei().unwrap()).await.unwrap();
        assert_eq!(hash, TX);

        let calls = host.calls();
        let (_, params) = &calls[0];
        assert_eq!(params[0]["from"], json!(ACCOUNT));
        assert_eq!(params[0]["data"], json!(call_data(abi::MINT)));
        assert_eq!(params[0]["value"], json!("0x2386f26fc10000"));
    }

    #[tokio::test]
    async fn test_start_presale_sends_no_value() {
        let host = MockHost::new();
        host.respond("eth_sendTransaction", Ok(json!(TX)));

        let config = DappConfig::default();
        let connection = signer();
        let contract = NftContract::new(&host, &config, &connection);

        contract.start_presale().await.unwrap();
        let calls = host.calls();
        let (_, params) = &calls[0];
        assert!(params[0].get("value").is_none());
    }

    #[tokio::test]
    async fn test_write_through_provider_is_refused() {
        let host = MockHost::new();
        let config = DappConfig::default();
        let connection = provider();
        let contract = NftContract::new(&host, &config, &connection);

        assert_eq!(contract.presale_mint(1).await, Err(DappError::ReadOnly));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_wait_polls_until_mined() {
        let host = MockHost::new();
        host.respond_once("eth_getTransactionReceipt", Ok(Value::Null));
        host.respond_once("eth_getTransactionReceipt", Ok(Value::Null));
        host.respond(
            "eth_getTransactionReceipt",
            Ok(json!({ "transactionHash": TX, "blockNumber": "0x10", "status": "0x1" })),
        );

        let config = DappConfig::default();
        let connection = signer();
        let contract = NftContract::new(&host, &config, &connection);

        let receipt = contract.wait(TX).await.unwrap();
        assert_eq!(receipt.transaction_hash, TX);
        assert_eq!(host.count("eth_getTransactionReceipt"), 3);
        assert_eq!(host.slept_ms(), 2 * config.receipt_poll_ms);
    }

    #[tokio::test]
    async fn test_wait_reports_revert_and_timeout() {
        let host = MockHost::new();
        host.respond(
            "eth_getTransactionReceipt",
            Ok(json!({ "transactionHash": TX, "status": "0x0" })),
        );
        let config = DappConfig { receipt_max_attempts: 3, ..DappConfig::default() };
        let connection = signer();
        let contract = NftContract::new(&host, &config, &connection);
        assert_eq!(contract.wait(TX).await.unwrap_err(), DappError::Reverted(TX.to_string()));

        let pending = MockHost::new();
        pending.respond("eth_getTransactionReceipt", Ok(Value::Null));
        let contract = NftContract::new(&pending, &config, &connection);
        assert_eq!(contract.wait(TX).await.unwrap_err(), DappError::Timeout(TX.to_string()));
        assert_eq!(pending.count("eth_getTransactionReceipt"), 3);
    }
}
