// src/core/mod.rs
//! Configuration and the outbound extraction-service client

pub mod config_manager;
pub mod service_client;

pub use config_manager::{AnalyzerConfig, ConfigManager};
pub use service_client::ServiceClient;
