//! Page state

pub mod dapp;
