use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;

/// Trend direction derived from last close vs EMA
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TrendSignal {
    Uptrend,
    Downtrend,
    Neutral,
}

/// Order side, serialized as the exchange expects ("BUY" / "SELL")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One limit order the planner wants placed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderIntent {
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
}

/// Ordered ladder of intents, all on the same side
pub type LadderPlan = Vec<OrderIntent>;

/// Exchange acknowledgment for a placed order (kept opaque)
pub type OrderAck = serde_json::Value;

/// Result of submitting one ladder step
#[derive(Debug)]
pub struct OrderOutcome {
    /// Zero-based position in the ladder
    pub step: usize,
    pub intent: OrderIntent,
    pub result: Result<OrderAck, ExchangeError>,
}

impl OrderOutcome {
    pub fn is_placed(&self) -> bool {
        self.result.is_ok()
    }
}
