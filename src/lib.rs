// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod execution;
pub mod indicators;
pub mod models;
pub mod strategy;

// Re-export commonly used types
pub use crate::api::{MarketData, OrderGateway, ToobitClient};
pub use crate::config::{AppConfig, StrategyConfig};
pub use crate::error::ExchangeError;
pub use crate::execution::{LadderRunner, RunReport};
pub use crate::models::*;
