pub mod auth;
pub mod toobit;

use std::future::Future;

use crate::error::ExchangeError;
use crate::models::{OrderAck, OrderIntent};

pub use auth::Credentials;
pub use toobit::ToobitClient;

/// Source of recent closing prices
pub trait MarketData {
    /// Closes for `symbol`, oldest first. One request, no retry.
    fn get_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<f64>, ExchangeError>> + Send;
}

/// Destination for limit orders
pub trait OrderGateway {
    /// Submit one GTC limit order. One request, no retry.
    fn place_limit_order(
        &self,
        symbol: &str,
        intent: &OrderIntent,
    ) -> impl Future<Output = Result<OrderAck, ExchangeError>> + Send;
}
