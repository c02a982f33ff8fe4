pub mod api;
pub mod client;
pub mod config;
pub mod demo;
pub mod engine;
pub mod error;
pub mod geo;
pub mod map;
pub mod models;
pub mod observability;
pub mod state;
pub mod store;
