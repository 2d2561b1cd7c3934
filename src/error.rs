use reqwest::StatusCode;
use thiserror::Error;

/// Failure kinds for a single exchange call
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("exchange returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid close value {0:?}")]
    InvalidClose(String),
}

impl ExchangeError {
    /// True when the exchange answered but rejected the request
    pub fn is_rejection(&self) -> bool {
        matches!(self, ExchangeError::Status { .. })
    }
}
