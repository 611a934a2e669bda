//! # Dapp Error Types
//!
//! A single error type, [`DappError`], covers every failure the dapp can hit
//! while talking to the injected wallet and the NFT contract.
//!
//! ## Error Categories
//!
//! - **Network**: [`WrongNetwork`](DappError::WrongNetwork) is the only
//!   user-visible error. The connection acquirer alerts before returning it
//!   and the caller's operation is aborted.
//! - **Wallet**: [`NoWallet`](DappError::NoWallet),
//!   [`NoAccount`](DappError::NoAccount), [`Rejected`](DappError::Rejected),
//!   [`Rpc`](DappError::Rpc)
//! - **Contract**: [`ReadOnly`](DappError::ReadOnly),
//!   [`Decode`](DappError::Decode), [`Reverted`](DappError::Reverted),
//!   [`Timeout`](DappError::Timeout)
//! - **Input**: [`InvalidAmount`](DappError::InvalidAmount),
//!   [`Config`](DappError::Config)
//!
//! Readers and mutators log everything except `WrongNetwork` and carry on;
//! the next poll tick is the retry.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, DappError>;

/// EIP-1193 error code for a request the user declined in the wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DappError {
    #[error("wrong network: expected chain {expected}, wallet is on chain {actual}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("no injected wallet found")]
    NoWallet,

    #[error("wallet exposed no accounts")]
    NoAccount,

    #[error("request rejected by user")]
    Rejected,

    #[error("rpc error{}: {message}", fmt_code(.code))]
    Rpc { code: Option<i64>, message: String },

    #[error("a signer is required for this call")]
    ReadOnly,

    #[error("failed to decode contract response: {0}")]
    Decode(String),

    #[error("invalid ether amount: {0}")]
    InvalidAmount(String),

    #[error("transaction {0} reverted")]
    Reverted(String),

    #[error("transaction {0} was not confirmed in time")]
    Timeout(String),

    #[error("configuration error: {0}")]
    Config(String),
}

fn fmt_code(code: &Option<i64>) -> String {
    code.map(|c| format!(" {}", c)).unwrap_or_default()
}

impl DappError {
    /// Build an error from an EIP-1193 `{ code, message }` failure.
    pub fn from_rpc(code: Option<i64>, message: impl Into<String>) -> Self {
        match code {
            Some(USER_REJECTED_CODE) => DappError::Rejected,
            _ => DappError::Rpc {
                code,
                message: message.into(),
            },
        }
    }

    pub fn is_wrong_network(&self) -> bool {
        matches!(self, DappError::WrongNetwork { .. })
    }
}

impl From<hex::FromHexError> for DappError {
    fn from(err: hex::FromHexError) -> Self {
        DappError::Decode(err.to_string())
    }
}
