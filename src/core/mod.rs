// src/core/mod.rs
//! Shared services: configuration and the upstream search client

pub mod config_manager;
pub mod search_client;

pub use config_manager::ConfigManager;
pub use search_client::SearchClient;
