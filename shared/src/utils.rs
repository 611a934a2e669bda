//! # Display Helpers
//!
//! Small formatting and comparison helpers used by the controller and the page.
//!
//! ```rust
//! use shared::utils::{addresses_equal, truncate_address};
//!
//! let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
//! assert_eq!(truncate_address(addr), "0x71C7...976F");
//! assert!(addresses_equal(addr, &addr.to_lowercase()));
//! ```

use chrono::{DateTime, Utc};

/// Show the first `prefix_len` and last `suffix_len` characters of an address.
///
/// Addresses too short to shorten are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
/// assert_eq!(format_address(addr, 6, 4), "0x71C7...976F");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if !address.is_ascii()
        || address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// `0x` plus four hex digits, then the last four.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Compare two hex addresses ignoring checksum casing.
pub fn addresses_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// `"<minted>/<max> have been minted"`
pub fn format_minted(minted: &str, max_supply: u32) -> String {
    format!("{}/{} have been minted", minted, max_supply)
}

/// Render a unix timestamp as a UTC deadline, e.g. `2023-01-05 14:30 UTC`.
pub fn format_deadline(unix_seconds: u64) -> Option<String> {
    let secs = i64::try_from(unix_seconds).ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
}
