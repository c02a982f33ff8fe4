pub mod acceptance;
pub mod browser;
pub mod chat;
pub mod debounce;
pub mod filter;
pub mod search;
pub mod sort;
