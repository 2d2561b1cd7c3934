//! API credentials and optional HMAC-SHA256 request signing

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::ConfigError;

type HmacSha256 = Hmac<Sha256>;

pub const API_KEY_ENV: &str = "TOOBIT_API_KEY";
pub const API_SECRET_ENV: &str = "TOOBIT_API_SECRET";

/// Hex HMAC-SHA256 of `payload` keyed by `secret`
pub fn sign_payload(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Read `TOOBIT_API_KEY` (required) and `TOOBIT_API_SECRET` (may be empty)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingEnv(API_KEY_ENV))?;
        let api_secret = std::env::var(API_SECRET_ENV).unwrap_or_default();
        Ok(Self::new(api_key, api_secret))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_secret(&self) -> bool {
        !self.api_secret.is_empty()
    }

    /// Signature over `timestamp` followed by the request body
    pub fn sign(&self, timestamp_ms: i64, body: &str) -> String {
        sign_payload(&format!("{}{}", timestamp_ms, body), &self.api_secret)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("api_secret", &"***")
            .finish()
    }
}
