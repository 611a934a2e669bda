//! # Dapp Controller
//!
//! The page's handlers: four state readers, three mutators, the mount-time
//! bootstrap and the two background timers. Every handler acquires its own
//! connection, talks to the contract once, and reports back through the
//! [`StateStore`].
//!
//! ## Failure policy
//!
//! Readers log and swallow errors, returning `false` or leaving state as it
//! was, so one failed RPC degrades one field and the next tick repairs it.
//! Mutators log failures and always clear `loading` once confirmation ends.
//! A wrong network has already been alerted by the acquirer.

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::config::DappConfig;
use crate::contract::NftContract;
use crate::error::{DappError, Result};
use crate::host::Host;
use crate::poll::{self, CancelToken};
use crate::state::{Action, StateStore};
use crate::utils::addresses_equal;
use crate::wallet::{get_provider_or_signer, Connection};

pub const MINT_SUCCESS_MESSAGE: &str = "You successfully minted a Crypto Dev!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mint {
    Presale,
    Public,
}

#[derive(Clone)]
pub struct Dapp<H: Host, S: StateStore> {
    host: H,
    store: S,
    config: Arc<DappConfig>,
}

impl<H: Host, S: StateStore> Dapp<H, S> {
    pub fn new(host: H, store: S, config: DappConfig) -> Self {
        Self {
            host,
            store,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DappConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn connect(&self, need_signer: bool) -> Result<Connection> {
        get_provider_or_signer(&self.host, &self.config, need_signer).await
    }

    /// Connect the wallet; prompts the user the first time.
    pub async fn connect_wallet(&self) {
        match self.connect(false).await {
            Ok(connection) => {
                let account = connection.provider().accounts.first().cloned();
                log::info!("Wallet connected: {:?}", account);
                self.store.dispatch(Action::WalletConnected { account });
            }
            Err(e) => log::error!("Failed to connect wallet: {}", e),
        }
    }

    /// Read `presaleStarted()`. When it is false the owner check runs too,
    /// so the owner can be offered the start control.
    pub async fn check_if_presale_started(&self) -> bool {
        let result: Result<bool> = async {
            let connection = self.connect(false).await?;
            NftContract::new(&self.host, &self.config, &connection)
                .presale_started()
                .await
        }
        .await;

        match result {
            Ok(started) => {
                if !started {
                    self.get_owner().await;
                }
                self.store.dispatch(Action::PresaleStarted(started));
                started
            }
            Err(e) => {
                log::error!("Failed to read presale start: {}", e);
                false
            }
        }
    }

    /// Read `presaleEnded()` and compare it with the wall clock.
    pub async fn check_if_presale_ended(&self) -> bool {
        let result: Result<u64> = async {
            let connection = self.connect(false).await?;
            NftContract::new(&self.host, &self.config, &connection)
                .presale_ended()
                .await
        }
        .await;

        match result {
            Ok(ends_at) => {
                let ended = presale_has_ended(ends_at, self.host.now_unix());
                self.store.dispatch(Action::PresaleEnded { ended, ends_at });
                ended
            }
            Err(e) => {
                log::error!("Failed to read presale end: {}", e);
                false
            }
        }
    }

    /// Compare the contract owner with the connected account.
    pub async fn get_owner(&self) {
        let result: Result<bool> = async {
            let connection = self.connect(true).await?;
            let signer = connection.signer().ok_or(DappError::NoAccount)?;
            let owner = NftContract::new(&self.host, &self.config, &connection)
                .owner()
                .await?;
            Ok(addresses_equal(&owner, &signer.address))
        }
        .await;

        match result {
            Ok(is_owner) => self.store.dispatch(Action::IsOwner(is_owner)),
            Err(e) => log::error!("Failed to read contract owner: {}", e),
        }
    }

    pub async fn get_token_ids_minted(&self) {
        let result: Result<u128> = async {
            let connection = self.connect(false).await?;
            NftContract::new(&self.host, &self.config, &connection)
                .token_ids()
                .await
        }
        .await;

        match result {
            Ok(count) => self.store.dispatch(Action::TokenIdsMinted(count.to_string())),
            Err(e) => log::error!("Failed to read minted token count: {}", e),
        }
    }

    /// Whitelisted mint while the presale runs.
    pub async fn presale_mint(&self) {
        self.mint_with(Mint::Presale).await;
    }

    /// Unrestricted mint after the presale.
    pub async fn public_mint(&self) {
        self.mint_with(Mint::Public).await;
    }

    async fn mint_with(&self, kind: Mint) {
        if self.refuse_if_busy("mint") {
            return;
        }

        let result: Result<()> = async {
            let value = self.config.mint_price_wei()?;
            let connection = self.connect(true).await?;
            let contract = NftContract::new(&self.host, &self.config, &connection);
            let tx_hash = match kind {
                Mint::Presale => contract.presale_mint(value).await?,
                Mint::Public => contract.mint(value).await?,
            };
            self.confirm(&contract, &tx_hash).await
        }
        .await;

        match result {
            Ok(()) => {
                self.host.alert(MINT_SUCCESS_MESSAGE);
                self.get_token_ids_minted().await;
            }
            Err(e) => log::error!("{:?} mint failed: {}", kind, e),
        }
    }

    /// Owner-only: open the presale, then re-read its state.
    pub async fn start_presale(&self) {
        if self.refuse_if_busy("start presale") {
            return;
        }

        let result: Result<()> = async {
            let connection = self.connect(true).await?;
            let contract = NftContract::new(&self.host, &self.config, &connection);
            let tx_hash = contract.start_presale().await?;
            self.confirm(&contract, &tx_hash).await
        }
        .await;

        match result {
            Ok(()) => {
                self.check_if_presale_started().await;
            }
            Err(e) => log::error!("Failed to start presale: {}", e),
        }
    }

    /// Hold `loading` while `tx_hash` confirms; cleared on every outcome.
    async fn confirm(&self, contract: &NftContract<'_, H>, tx_hash: &str) -> Result<()> {
        self.store.dispatch(Action::Loading(true));
        let outcome = contract.wait(tx_hash).await;
        self.store.dispatch(Action::Loading(false));
        outcome.map(|_| ())
    }

    fn refuse_if_busy(&self, what: &str) -> bool {
        let busy = self.store.snapshot().loading;
        if busy {
            log::warn!("Ignoring {} request: a transaction is already in flight", what);
        }
        busy
    }

    /// One pass over every reader, as run when the page mounts.
    pub async fn bootstrap(&self) {
        self.connect_wallet().await;
        if self.check_if_presale_started().await {
            self.check_if_presale_ended().await;
        }
        self.get_token_ids_minted().await;
    }

    /// Re-check presale state every period until the presale has ended.
    pub async fn watch_presale(&self, token: &CancelToken) {
        let ticks = poll::every(
            token,
            self.config.poll_interval_ms,
            |ms| self.host.sleep(ms),
            || async move {
                if self.check_if_presale_started().await && self.check_if_presale_ended().await {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        )
        .await;
        log::debug!("Presale watch stopped after {} ticks", ticks);
    }

    /// Refresh the minted count every period until cancelled.
    pub async fn watch_token_ids(&self, token: &CancelToken) {
        let ticks = poll::every(
            token,
            self.config.poll_interval_ms,
            |ms| self.host.sleep(ms),
            || async move {
                self.get_token_ids_minted().await;
                ControlFlow::Continue(())
            },
        )
        .await;
        log::debug!("Token counter stopped after {} ticks", ticks);
    }
}

/// The presale is over once its end timestamp is not in the future.
pub fn presale_has_ended(ends_at: u64, now: u64) -> bool {
    ends_at <= now
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::abi::{self, word_from_address, word_from_uint};
    use crate::host::mock::MockHost;
    use crate::state::memory::MemoryStore;
    use crate::state::DappState;

    const ACCOUNT: &str = "0xabc0000000000000000000000000000000000001";
    const NOW: u64 = 1_700_000_000;

    fn dapp(host: &MockHost) -> Dapp<&MockHost, MemoryStore> {
        Dapp::new(host, MemoryStore::default(), DappConfig::default())
    }

    fn mined() -> Value {
        json!({ "transactionHash": "0xfeed", "status": "0x1" })
    }

    #[test]
    fn test_presale_has_ended() {
        assert!(presale_has_ended(NOW - 1, NOW));
        assert!(presale_has_ended(NOW, NOW));
        assert!(!presale_has_ended(NOW + 3600, NOW));
    }

    #[tokio::test]
    async fn test_presale_ended_against_clock() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.set_now(NOW);
        let dapp = dapp(&host);

        host.call_returns(abi::PRESALE_ENDED, word_from_uint((NOW - 1) as u128));
        assert!(dapp.check_if_presale_ended().await);
        assert!(dapp.store().snapshot().presale_ended);

        host.call_returns(abi::PRESALE_ENDED, word_from_uint((NOW + 3600) as u128));
        assert!(!dapp.check_if_presale_ended().await);
        let state = dapp.store().snapshot();
        assert!(!state.presale_ended);
        assert_eq!(state.presale_ends_at, Some(NOW + 3600));
    }

    #[tokio::test]
    async fn test_owner_compare_ignores_case() {
        // wallets hand out checksum-cased addresses, the contract word decodes lowercase
        let host = MockHost::wallet(5, &["0xABC0000000000000000000000000000000000DEF"]);
        host.call_returns(abi::OWNER, word_from_address("0xabc0000000000000000000000000000000000def"));
        let dapp = dapp(&host);

        dapp.get_owner().await;
        assert!(dapp.store().snapshot().is_owner);
    }

    #[tokio::test]
    async fn test_other_account_is_not_owner() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.call_returns(abi::OWNER, word_from_address("0x9990000000000000000000000000000000000999"));
        let dapp = dapp(&host);

        dapp.get_owner().await;
        assert!(!dapp.store().snapshot().is_owner);
    }

    #[tokio::test]
    async fn test_not_started_triggers_owner_check() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(0));
        host.call_returns(abi::OWNER, word_from_address(ACCOUNT));
        let dapp = dapp(&host);

        assert!(!dapp.check_if_presale_started().await);
        assert_eq!(
            dapp.store().actions(),
            vec![Action::IsOwner(true), Action::PresaleStarted(false)]
        );
    }

    #[tokio::test]
    async fn test_started_skips_owner_check() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(1));
        let dapp = dapp(&host);

        assert!(dapp.check_if_presale_started().await);
        assert_eq!(dapp.store().actions(), vec![Action::PresaleStarted(true)]);
    }

    #[tokio::test]
    async fn test_reader_failure_keeps_last_value() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        let store = MemoryStore::with_state(DappState {
            token_ids_minted: "4".to_string(),
            ..DappState::default()
        });
        let dapp = Dapp::new(&host, store, DappConfig::default());

        // no tokenIds() response scripted: the call fails
        dapp.get_token_ids_minted().await;
        assert_eq!(dapp.store().snapshot().token_ids_minted, "4");
        assert!(!dapp.check_if_presale_started().await);
        assert!(dapp.store().actions().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_network_aborts_reader() {
        let host = MockHost::wallet(1, &[ACCOUNT]);
        host.call_returns(abi::TOKEN_IDS, word_from_uint(9));
        let dapp = dapp(&host);

        dapp.get_token_ids_minted().await;
        assert_eq!(dapp.store().snapshot().token_ids_minted, "0");
        assert_eq!(host.alerts(), vec!["Change the network to Goerli".to_string()]);
        assert_eq!(host.count("eth_call"), 0);
    }

    #[tokio::test]
    async fn test_mint_success_resets_loading_and_alerts() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        host.respond("eth_getTransactionReceipt", Ok(mined()));
        host.call_returns(abi::TOKEN_IDS, word_from_uint(6));
        let dapp = dapp(&host);

        dapp.public_mint().await;

        let actions = dapp.store().actions();
        assert_eq!(actions[0], Action::Loading(true));
        assert_eq!(actions[1], Action::Loading(false));
        assert_eq!(actions[2], Action::TokenIdsMinted("6".to_string()));
        assert_eq!(host.alerts(), vec![MINT_SUCCESS_MESSAGE.to_string()]);
    }

    #[tokio::test]
    async fn test_mint_failure_resets_loading() {
        // Arrange
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        host.respond(
            "eth_getTransactionReceipt",
            Err(DappError::Rpc { code: Some(-32000), message: "node down".to_string() }),
        );
        let dapp = dapp(&host);

        // Act
        dapp.presale_mint().await;

        // Assert
        assert_eq!(
            dapp.store().actions(),
            vec![Action::Loading(true), Action::Loading(false)]
        );
        assert!(!dapp.store().snapshot().loading);
        assert!(host.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_mint_never_sets_loading() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.respond("eth_sendTransaction", Err(DappError::Rejected));
        let dapp = dapp(&host);

        dapp.presale_mint().await;
        assert!(dapp.store().actions().is_empty());
    }

    #[tokio::test]
    async fn test_busy_mutator_is_refused() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        let store = MemoryStore::with_state(DappState { loading: true, ..DappState::default() });
        let dapp = Dapp::new(&host, store, DappConfig::default());

        dapp.public_mint().await;
        dapp.start_presale().await;
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn test_start_presale_rereads_state() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.respond("eth_sendTransaction", Ok(json!("0xfeed")));
        host.respond("eth_getTransactionReceipt", Ok(mined()));
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(1));
        let dapp = dapp(&host);

        dapp.start_presale().await;

        let calls = host.calls();
        let (_, sent) = calls
            .iter()
            .find(|(m, _)| m == "eth_sendTransaction")
            .unwrap();
        assert_eq!(sent[0]["data"], json!(abi::call_data(abi::START_PRESALE)));
        assert!(dapp.store().snapshot().presale_started);
        assert!(!dapp.store().snapshot().loading);
        assert!(host.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_reads_everything() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.set_now(NOW);
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(1));
        host.call_returns(abi::PRESALE_ENDED, word_from_uint((NOW + 60) as u128));
        host.call_returns(abi::TOKEN_IDS, word_from_uint(3));
        let dapp = dapp(&host);

        dapp.bootstrap().await;

        let state = dapp.store().snapshot();
        assert!(state.wallet_connected);
        assert_eq!(state.account.as_deref(), Some(ACCOUNT));
        assert!(state.presale_started);
        assert!(!state.presale_ended);
        assert_eq!(state.token_ids_minted, "3");
    }

    #[tokio::test]
    async fn test_bootstrap_skips_end_check_before_presale() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(0));
        host.call_returns(abi::OWNER, word_from_address(ACCOUNT));
        host.call_returns(abi::TOKEN_IDS, word_from_uint(0));
        let dapp = dapp(&host);

        dapp.bootstrap().await;

        let ended_reads = host
            .calls()
            .iter()
            .filter(|(_, p)| p[0]["data"] == json!(abi::call_data(abi::PRESALE_ENDED)))
            .count();
        assert_eq!(ended_reads, 0);
        assert!(dapp.store().snapshot().is_owner);
    }

    #[tokio::test]
    async fn test_presale_watch_stops_once_ended() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.set_now(NOW);
        host.call_returns(abi::PRESALE_STARTED, word_from_uint(1));
        host.respond_once(abi::PRESALE_ENDED, Ok(json!(word_from_uint((NOW + 10) as u128))));
        host.call_returns(abi::PRESALE_ENDED, word_from_uint((NOW - 10) as u128));
        let dapp = dapp(&host);

        dapp.watch_presale(&CancelToken::new()).await;

        assert!(dapp.store().snapshot().presale_ended);
        assert_eq!(host.slept_ms(), 2 * dapp.config().poll_interval_ms);
    }

    #[tokio::test]
    async fn test_token_counter_updates_each_period() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        host.respond_once(abi::TOKEN_IDS, Ok(json!(word_from_uint(1))));
        host.respond_once(abi::TOKEN_IDS, Ok(json!(word_from_uint(2))));
        host.respond_once(abi::TOKEN_IDS, Ok(json!(word_from_uint(5))));
        let dapp = &dapp(&host);
        let token = &CancelToken::new();
        let counts = &std::cell::RefCell::new(Vec::new());

        poll::every(
            token,
            dapp.config().poll_interval_ms,
            |ms| host.sleep(ms),
            || async move {
                dapp.get_token_ids_minted().await;
                counts.borrow_mut().push(dapp.store().snapshot().token_ids_minted);
                if counts.borrow().len() == 3 {
                    token.cancel();
                }
                ControlFlow::Continue(())
            },
        )
        .await;

        assert_eq!(*counts.borrow(), vec!["1", "2", "5"]);
    }

    #[tokio::test]
    async fn test_cancelled_token_counter_never_reads() {
        let host = MockHost::wallet(5, &[ACCOUNT]);
        let dapp = dapp(&host);
        let token = CancelToken::new();
        token.cancel();

        dapp.watch_token_ids(&token).await;
        assert_eq!(host.count("eth_call"), 0);
    }
}
