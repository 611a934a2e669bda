//! UI Components

pub mod mint_panel;
pub mod navbar;

pub use mint_panel::MintPanel;
pub use navbar::Navbar;
