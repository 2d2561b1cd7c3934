use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::{Credentials, MarketData, OrderGateway};
use crate::config::{AuthMode, ExchangeConfig};
use crate::error::ExchangeError;
use crate::models::{OrderAck, OrderIntent, Side};

const CANDLES_PATH: &str = "/api/v1/market/candles";
const PLACE_ORDER_PATH: &str = "/api/v1/trade/placeOrder";

/// Client for the Toobit REST API
///
/// Every call is a single attempt. Failures come back as [`ExchangeError`]
/// and are logged here; nothing is retried.
#[derive(Clone)]
pub struct ToobitClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    auth_mode: AuthMode,
}

// ============== Wire Types ==============

#[derive(Debug, Deserialize)]
struct CandlesResponse {
    data: Vec<CandleRaw>,
}

#[derive(Debug, Deserialize)]
struct CandleRaw {
    close: NumberOrString,
}

/// Numeric fields arrive either as JSON numbers or as strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn to_f64(&self) -> Result<f64, ExchangeError> {
        match self {
            NumberOrString::Number(n) => Ok(*n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ExchangeError::InvalidClose(s.clone())),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlaceOrderRequest<'a> {
    symbol: &'a str,
    side: Side,
    #[serde(rename = "type")]
    order_type: &'static str,
    price: f64,
    quantity: f64,
    time_in_force: &'static str,
}

impl<'a> PlaceOrderRequest<'a> {
    fn limit_gtc(symbol: &'a str, intent: &OrderIntent) -> Self {
        Self {
            symbol,
            side: intent.side,
            order_type: "LIMIT",
            price: intent.price,
            quantity: intent.quantity,
            time_in_force: "GTC",
        }
    }
}

// ============== Implementation ==============

impl ToobitClient {
    pub fn new(config: &ExchangeConfig, credentials: Credentials) -> Result<Self, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.auth_mode == AuthMode::HmacSha256 && !credentials.has_secret() {
            tracing::warn!("HMAC signing enabled but TOOBIT_API_SECRET is empty");
        }

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            auth_mode: config.auth_mode,
        })
    }

    /// Fetch closing prices
    ///
    /// Endpoint: GET /api/v1/market/candles?symbol={symbol}&interval={interval}&limit={limit}
    pub async fn fetch_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, ExchangeError> {
        let url = format!("{}{}", self.base_url, CANDLES_PATH);
        tracing::debug!("GET {} symbol={} interval={} limit={}", url, symbol, interval, limit);

        let limit = limit.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("symbol", symbol), ("interval", interval), ("limit", limit.as_str())])
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let parsed: CandlesResponse = serde_json::from_str(&body)?;

        parsed.data.iter().map(|c| c.close.to_f64()).collect()
    }

    /// Submit a LIMIT / GTC order
    ///
    /// Endpoint: POST /api/v1/trade/placeOrder
    pub async fn submit_limit_order(
        &self,
        symbol: &str,
        intent: &OrderIntent,
    ) -> Result<OrderAck, ExchangeError> {
        let url = format!("{}{}", self.base_url, PLACE_ORDER_PATH);
        let body = serde_json::to_string(&PlaceOrderRequest::limit_gtc(symbol, intent))?;
        tracing::debug!("POST {} {}", url, body);

        let mut request = self
            .client
            .post(&url)
            .header("X-API-KEY", self.credentials.api_key())
            .header("Content-Type", "application/json");

        if self.auth_mode == AuthMode::HmacSha256 {
            let timestamp = chrono::Utc::now().timestamp_millis();
            request = request
                .header("X-TIMESTAMP", timestamp.to_string())
                .header("X-SIGNATURE", self.credentials.sign(timestamp, &body));
        }

        let response = request.body(body).send().await?;
        let text = Self::success_body(response).await?;

        let ack = if text.trim().is_empty() {
            OrderAck::Null
        } else {
            serde_json::from_str(&text).unwrap_or(OrderAck::String(text))
        };

        Ok(ack)
    }

    /// Body of a 2xx response, or a `Status` error carrying the body text
    async fn success_body(response: Response) -> Result<String, ExchangeError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ExchangeError::Status { status, body });
        }

        Ok(body)
    }
}

impl MarketData for ToobitClient {
    async fn get_closes(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<f64>, ExchangeError> {
        let result = self.fetch_closes(symbol, interval, limit).await;
        if let Err(ref e) = result {
            tracing::error!("Error fetching candles for {}: {}", symbol, e);
        }
        result
    }
}

impl OrderGateway for ToobitClient {
    async fn place_limit_order(
        &self,
        symbol: &str,
        intent: &OrderIntent,
    ) -> Result<OrderAck, ExchangeError> {
        match self.submit_limit_order(symbol, intent).await {
            Ok(ack) => {
                tracing::info!(
                    "Order placed: {} {} {} @ {}",
                    intent.side,
                    intent.quantity,
                    symbol,
                    intent.price
                );
                Ok(ack)
            }
            Err(e) => {
                if e.is_rejection() {
                    tracing::error!("Order error: {}", e);
                } else {
                    tracing::error!("Exception placing order: {}", e);
                }
                Err(e)
            }
        }
    }
}
