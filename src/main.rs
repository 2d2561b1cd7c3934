use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ladderbot::api::{Credentials, ToobitClient};
use ladderbot::config::AppConfig;
use ladderbot::execution::{LadderRunner, RunOutcome};
use tracing_subscriber::EnvFilter;

/// One pass of the EMA-confirmed ladder strategy
#[derive(Debug, Parser)]
#[command(name = "ladderbot", version)]
struct Cli {
    /// Config file (defaults to ./ladderbot.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plan and log the ladder without placing orders
    #[arg(long)]
    dry_run: bool,

    /// Override the trading pair
    #[arg(long)]
    symbol: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(symbol) = cli.symbol {
        config.strategy.symbol = symbol;
    }
    if cli.dry_run {
        config.strategy.dry_run = true;
    }
    config.validate().context("Invalid configuration")?;

    let credentials = match Credentials::from_env() {
        Ok(creds) => creds,
        Err(e) if config.strategy.dry_run => {
            tracing::warn!("{} (dry run, continuing without credentials)", e);
            Credentials::new("", "")
        }
        Err(e) => return Err(e).context("Exchange credentials are required"),
    };

    let client = ToobitClient::new(&config.exchange, credentials)
        .context("Failed to build HTTP client")?;
    let runner = LadderRunner::new(client.clone(), client, config.strategy);

    log_configuration(&config.exchange.base_url, runner.config());

    let report = runner.run_once().await;

    match report.outcome {
        RunOutcome::Submitted => tracing::info!(
            "Run {} finished: {} of {} orders placed",
            report.run_id,
            report.placed(),
            report.orders.len()
        ),
        outcome => tracing::info!("Run {} finished without orders: {:?}", report.run_id, outcome),
    }

    Ok(())
}

fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ladderbot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn log_configuration(base_url: &str, strategy: &ladderbot::StrategyConfig) {
    tracing::info!("Configuration:");
    tracing::info!("  Exchange: {}", base_url);
    tracing::info!(
        "  Symbol: {} ({} candles x {})",
        strategy.symbol,
        strategy.candle_limit,
        strategy.interval
    );
    tracing::info!("  EMA period: {}", strategy.ema_period);
    tracing::info!(
        "  Ladder: {} steps of {} x {}",
        strategy.ladder_steps,
        strategy.step_size,
        strategy.order_quantity
    );
    tracing::info!("  Order delay: {}ms", strategy.order_delay_ms);
    if strategy.dry_run {
        tracing::info!("  Mode: DRY RUN");
    }
}
