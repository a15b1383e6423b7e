pub mod filter;
pub mod game;
pub mod library;
pub mod store;
pub mod toast;
