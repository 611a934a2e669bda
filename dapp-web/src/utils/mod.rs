//! Page utilities

pub mod constants;
pub mod url;
