//! Application constants

pub const COLLECTION_NAME: &str = "Crypto Devs";
pub const COLLECTION_TAGLINE: &str = "Its an NFT collection for developers in Crypto.";
pub const COLLECTION_IMAGE: &str = "./cryptodevs/0.svg";

/// Overlay in index.html shown until the WASM module starts
pub const LOADING_ELEMENT_ID: &str = "leptos-loading";

// URL query parameters that override the build-time config
pub const CONTRACT_PARAM: &str = "contract";
pub const CHAIN_ID_PARAM: &str = "chain_id";
pub const NETWORK_PARAM: &str = "network";
