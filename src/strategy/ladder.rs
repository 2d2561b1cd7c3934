use crate::config::LadderParams;
use crate::models::{LadderPlan, OrderIntent, Side, TrendSignal};

/// Build the ladder of limit orders for a trend
///
/// - Uptrend: buys at `last - i * step_size`, stepping down from the market
/// - Downtrend: sells at `last + i * step_size`, stepping up from the market
/// - Neutral: no orders
///
/// Always `params.steps` intents for a directional trend. Levels the exchange
/// will not accept (zero or negative buys) are kept and fail on submission
/// like any other rejected order.
pub fn plan_ladder(last_price: f64, trend: TrendSignal, params: &LadderParams) -> LadderPlan {
    let (side, direction) = match trend {
        TrendSignal::Uptrend => (Side::Buy, -1.0),
        TrendSignal::Downtrend => (Side::Sell, 1.0),
        TrendSignal::Neutral => return Vec::new(),
    };

    let plan: LadderPlan = (0..params.steps)
        .map(|i| OrderIntent {
            side,
            price: last_price + direction * i as f64 * params.step_size,
            quantity: params.quantity,
        })
        .collect();

    if let Some(lowest) = plan.last().filter(|o| o.price <= 0.0) {
        tracing::warn!(
            "Ladder reaches a non-positive price ({}); those steps will be rejected",
            lowest.price
        );
    }

    plan
}
