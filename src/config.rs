use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.toobit.com";
const DEFAULT_CONFIG_FILE: &str = "ladderbot.toml";
const ENV_PREFIX: &str = "LADDERBOT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] ::config::ConfigError),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How order requests are authenticated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// API key header only
    #[default]
    ApiKey,
    /// API key header plus HMAC-SHA256 signature over timestamp + body
    HmacSha256,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub auth_mode: AuthMode,
}

/// Strategy parameters for one ladder pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Trading pair, e.g. BTCUSDT
    pub symbol: String,
    /// Candle interval, e.g. 1m
    pub interval: String,
    /// How many candles to request
    pub candle_limit: usize,
    /// EMA smoothing period; also the minimum history required
    pub ema_period: usize,
    /// Number of ladder orders
    pub ladder_steps: usize,
    /// Price distance between ladder orders
    pub step_size: f64,
    /// Quantity of every ladder order
    pub order_quantity: f64,
    /// Fixed pause between successive order submissions
    pub order_delay_ms: u64,
    /// Plan and log the ladder without submitting
    pub dry_run: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: "1m".to_string(),
            candle_limit: 50,
            ema_period: 20,
            ladder_steps: 5,
            step_size: 200.0,
            order_quantity: 0.001,
            order_delay_ms: 1000,
            dry_run: false,
        }
    }
}

/// The subset of strategy parameters the ladder planner needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderParams {
    pub steps: usize,
    pub step_size: f64,
    pub quantity: f64,
}

impl StrategyConfig {
    pub fn ladder(&self) -> LadderParams {
        LadderParams {
            steps: self.ladder_steps,
            step_size: self.step_size,
            quantity: self.order_quantity,
        }
    }

    pub fn order_delay(&self) -> Duration {
        Duration::from_millis(self.order_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.interval.trim().is_empty() {
            return Err(ConfigError::Invalid("interval must not be empty".into()));
        }
        if self.candle_limit == 0 {
            return Err(ConfigError::Invalid("candle_limit must be > 0".into()));
        }
        if self.ema_period == 0 {
            return Err(ConfigError::Invalid("ema_period must be > 0".into()));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "step_size must be > 0, got {}",
                self.step_size
            )));
        }
        if !(self.order_quantity.is_finite() && self.order_quantity > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "order_quantity must be > 0, got {}",
                self.order_quantity
            )));
        }
        if self.candle_limit < self.ema_period {
            tracing::warn!(
                "candle_limit {} is below ema_period {}; every pass will lack history",
                self.candle_limit,
                self.ema_period
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub exchange: ExchangeConfig,
    pub strategy: StrategyConfig,
}

impl AppConfig {
    /// Load defaults, then the config file, then `LADDERBOT_*` environment overrides
    ///
    /// Without an explicit path, `ladderbot.toml` in the working directory is
    /// used if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`AppConfig::load`], reading overrides from `env` instead of
    /// the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = StrategyConfig::default();

        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("exchange.base_url", DEFAULT_BASE_URL)?
            .set_default("exchange.timeout_secs", 10_i64)?
            .set_default("exchange.auth_mode", "api_key")?
            .set_default("strategy.symbol", defaults.symbol)?
            .set_default("strategy.interval", defaults.interval)?
            .set_default("strategy.candle_limit", defaults.candle_limit as i64)?
            .set_default("strategy.ema_period", defaults.ema_period as i64)?
            .set_default("strategy.ladder_steps", defaults.ladder_steps as i64)?
            .set_default("strategy.step_size", defaults.step_size)?
            .set_default("strategy.order_quantity", defaults.order_quantity)?
            .set_default("strategy.order_delay_ms", defaults.order_delay_ms as i64)?
            .set_default("strategy.dry_run", defaults.dry_run)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let app: AppConfig = settings.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exchange.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("exchange.base_url must not be empty".into()));
        }
        self.strategy.validate()
    }
}
