/// Smoothing constant k = 2 / (period + 1)
fn smoothing(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Calculate the full Exponential Moving Average (EMA) series
///
/// Seeded with the first price (`ema[0] = price[0]`), then
/// `ema[i] = price[i] * k + ema[i-1] * (1 - k)`.
/// The output has the same length as the input.
pub fn ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    let k = smoothing(period);
    let mut series = Vec::with_capacity(prices.len());

    for &price in prices {
        let next = match series.last() {
            Some(&prev) => price * k + prev * (1.0 - k),
            None => price,
        };
        series.push(next);
    }

    series
}

/// Calculate the latest EMA value
///
/// Returns `None` for an empty slice. Callers decide how much history is
/// enough; this only needs one price.
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    ema_series(prices, period).last().copied()
}
