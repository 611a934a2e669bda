//! # Contract Interface Encoding
//!
//! The NFT contract is called with zero-argument functions only, so the call
//! data is just the 4-byte function selector. Results come back as 32-byte
//! ABI words which are decoded here as `bool`, `uint256` (bounded to `u128`)
//! or `address`.
//!
//! ## Usage
//!
//! ```rust
//! use shared::abi::{call_data, parse_ether, to_quantity};
//!
//! assert_eq!(call_data("owner()"), "0x8da5cb5b");
//! assert_eq!(to_quantity(parse_ether("0.01").unwrap()), "0x2386f26fc10000");
//! ```

use sha3::{Digest, Keccak256};

use crate::error::{DappError, Result};

pub const PRESALE_STARTED: &str = "presaleStarted()";
pub const PRESALE_ENDED: &str = "presaleEnded()";
pub const OWNER: &str = "owner()";
pub const TOKEN_IDS: &str = "tokenIds()";
pub const PRESALE_MINT: &str = "presaleMint()";
pub const MINT: &str = "mint()";
pub const START_PRESALE: &str = "startPresale()";

const WORD_LEN: usize = 32;
const ADDRESS_LEN: usize = 20;
const ETHER_DECIMALS: usize = 18;

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// `0x`-prefixed call data for a function that takes no arguments.
pub fn call_data(signature: &str) -> String {
    format!("0x{}", hex::encode(selector(signature)))
}

fn first_word(data: &str) -> Result<[u8; WORD_LEN]> {
    let bytes = hex::decode(strip_0x(data))?;
    if bytes.len() < WORD_LEN {
        return Err(DappError::Decode(format!(
            "expected at least {} bytes, got {}",
            WORD_LEN,
            bytes.len()
        )));
    }
    let mut word = [0u8; WORD_LEN];
    word.copy_from_slice(&bytes[..WORD_LEN]);
    Ok(word)
}

pub fn decode_bool(data: &str) -> Result<bool> {
    Ok(first_word(data)?.iter().any(|b| *b != 0))
}

/// Decode a `uint256` word. Values above `u128::MAX` are rejected.
pub fn decode_uint(data: &str) -> Result<u128> {
    let word = first_word(data)?;
    let (high, low) = word.split_at(WORD_LEN - 16);
    if high.iter().any(|b| *b != 0) {
        return Err(DappError::Decode("uint256 does not fit in u128".to_string()));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(low);
    Ok(u128::from_be_bytes(buf))
}

/// Decode an `address` word as lowercase `0x` hex.
pub fn decode_address(data: &str) -> Result<String> {
    let word = first_word(data)?;
    Ok(format!("0x{}", hex::encode(&word[WORD_LEN - ADDRESS_LEN..])))
}

/// Parse a decimal ether amount (`"0.01"`) into wei.
pub fn parse_ether(amount: &str) -> Result<u128> {
    let invalid = || DappError::InvalidAmount(amount.to_string());
    let amount = amount.trim();
    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) || fraction.len() > ETHER_DECIMALS {
        return Err(invalid());
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
    let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
    let fraction: u128 = padded.parse().map_err(|_| invalid())?;

    whole
        .checked_mul(10u128.pow(ETHER_DECIMALS as u32))
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(invalid)
}

/// Render a JSON-RPC hex quantity (no leading zeros).
pub fn to_quantity(value: u128) -> String {
    format!("{:#x}", value)
}

/// Parse a JSON-RPC hex quantity such as a chain id or receipt status.
pub fn parse_quantity(quantity: &str) -> Result<u64> {
    let digits = strip_0x(quantity);
    if digits.is_empty() {
        return Err(DappError::Decode(format!("empty quantity {:?}", quantity)));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| DappError::Decode(format!("bad quantity {:?}: {}", quantity, e)))
}

/// True when `s` is a `0x`-prefixed 20-byte hex address (any case).
pub fn is_address(s: &str) -> bool {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(body) => body.len() == ADDRESS_LEN * 2 && body.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s)
}

#[cfg(test)]
pub(crate) fn word_from_uint(value: u128) -> String {
    format!("0x{:064x}", value)
}

#[cfg(test)]
pub(crate) fn word_from_address(address: &str) -> String {
    format!("0x{:0>64}", strip_0x(address).to_lowercase())
}
