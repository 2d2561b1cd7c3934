use chrono::{DateTime, Utc};
use tracing::Instrument;
use uuid::Uuid;

use super::OrderPacer;
use crate::api::{MarketData, OrderGateway};
use crate::config::StrategyConfig;
use crate::models::{LadderPlan, OrderOutcome, TrendSignal};
use crate::strategy::{plan_ladder, TrendReading};

/// How a pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Candle fetch failed or returned nothing
    NoData,
    /// Fewer closes than the EMA period
    InsufficientHistory { have: usize, need: usize },
    /// Last close equals the EMA
    Neutral,
    /// Ladder planned and logged, nothing submitted
    DryRun,
    /// Every planned order was attempted
    Submitted,
}

/// Everything one pass produced
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub outcome: RunOutcome,
    pub trend: Option<TrendReading>,
    pub plan: LadderPlan,
    pub orders: Vec<OrderOutcome>,
}

impl RunReport {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            outcome: RunOutcome::NoData,
            trend: None,
            plan: Vec::new(),
            orders: Vec::new(),
        }
    }

    pub fn placed(&self) -> usize {
        self.orders.iter().filter(|o| o.is_placed()).count()
    }

    pub fn failed(&self) -> usize {
        self.orders.len() - self.placed()
    }
}

/// Runs one fetch → EMA → ladder → submit pass
///
/// Strictly sequential. A failed order never stops the ladder; the next
/// step is attempted once the pacing delay has passed after the previous
/// call returned.
pub struct LadderRunner<M, G> {
    market: M,
    gateway: G,
    config: StrategyConfig,
    pacer: OrderPacer,
}

impl<M, G> LadderRunner<M, G>
where
    M: MarketData,
    G: OrderGateway,
{
    pub fn new(market: M, gateway: G, config: StrategyConfig) -> Self {
        let pacer = OrderPacer::fixed_delay(config.order_delay());
        Self {
            market,
            gateway,
            config,
            pacer,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub async fn run_once(&self) -> RunReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("ladder_run", %run_id, symbol = %self.config.symbol);
        self.run(run_id).instrument(span).await
    }

    async fn run(&self, run_id: Uuid) -> RunReport {
        let cfg = &self.config;
        let mut report = RunReport::new(run_id);

        tracing::info!("Starting ladder strategy pass");

        let closes = match self
            .market
            .get_closes(&cfg.symbol, &cfg.interval, cfg.candle_limit)
            .await
        {
            Ok(closes) => closes,
            Err(e) => {
                tracing::error!("No candle data, skipping pass: {}", e);
                return report;
            }
        };

        if closes.is_empty() {
            tracing::warn!("Exchange returned no candles, skipping pass");
            return report;
        }

        if closes.len() < cfg.ema_period {
            tracing::warn!(
                "Not enough candle data: {} closes, need {}",
                closes.len(),
                cfg.ema_period
            );
            report.outcome = RunOutcome::InsufficientHistory {
                have: closes.len(),
                need: cfg.ema_period,
            };
            return report;
        }

        // closes is non-empty here
        let Some(reading) = TrendReading::from_closes(&closes, cfg.ema_period) else {
            return report;
        };
        report.trend = Some(reading);

        tracing::info!(
            "Last price: {}, EMA{}: {:.4}",
            reading.last_price,
            cfg.ema_period,
            reading.ema
        );

        match reading.signal {
            TrendSignal::Uptrend => {
                tracing::info!("Uptrend confirmed - placing buy ladder orders")
            }
            TrendSignal::Downtrend => {
                tracing::info!("Downtrend confirmed - placing sell ladder orders")
            }
            TrendSignal::Neutral => {
                tracing::info!("Price at EMA - no orders placed");
                report.outcome = RunOutcome::Neutral;
                return report;
            }
        }

        report.plan = plan_ladder(reading.last_price, reading.signal, &cfg.ladder());

        if cfg.dry_run {
            for (step, intent) in report.plan.iter().enumerate() {
                tracing::info!(
                    "[DRY RUN] step {}: {} {} @ {}",
                    step + 1,
                    intent.side,
                    intent.quantity,
                    intent.price
                );
            }
            report.outcome = RunOutcome::DryRun;
            return report;
        }

        tracing::info!(
            "Submitting {} orders, {}ms apart",
            report.plan.len(),
            self.pacer.delay().as_millis()
        );

        for (step, intent) in report.plan.iter().enumerate() {
            if step > 0 {
                self.pacer.pause().await;
            }

            let result = self.gateway.place_limit_order(&cfg.symbol, intent).await;
            if let Err(ref e) = result {
                tracing::warn!("Ladder step {} failed, continuing: {}", step + 1, e);
            }

            report.orders.push(OrderOutcome {
                step,
                intent: *intent,
                result,
            });
        }

        report.outcome = RunOutcome::Submitted;
        tracing::info!(
            "Ladder pass complete: {} placed, {} failed",
            report.placed(),
            report.failed()
        );

        report
    }
}
