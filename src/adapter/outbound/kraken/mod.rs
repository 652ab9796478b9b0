//! Kraken exchange integration.

pub mod auth;
pub mod client;
pub mod dto;
pub mod orderer;
pub mod settings;

pub use auth::KrakenCredentials;
pub use client::{KrakenApi, KrakenClient};
pub use orderer::KrakenOrderer;
pub use settings::KrakenConfig;
