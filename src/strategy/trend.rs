use crate::indicators::calculate_ema;
use crate::models::TrendSignal;

/// Compare the latest close to the EMA
///
/// Exact float comparison: only a last price equal to the EMA is Neutral.
pub fn classify_trend(last_price: f64, ema: f64) -> TrendSignal {
    if last_price > ema {
        TrendSignal::Uptrend
    } else if last_price < ema {
        TrendSignal::Downtrend
    } else {
        TrendSignal::Neutral
    }
}

/// Last close, its EMA and the resulting signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendReading {
    pub last_price: f64,
    pub ema: f64,
    pub signal: TrendSignal,
}

impl TrendReading {
    /// `None` for an empty series
    pub fn from_closes(closes: &[f64], ema_period: usize) -> Option<Self> {
        let last_price = *closes.last()?;
        let ema = calculate_ema(closes, ema_period)?;

        Some(Self {
            last_price,
            ema,
            signal: classify_trend(last_price, ema),
        })
    }
}
