// Technical indicators module
// EMA used for trend confirmation

pub mod moving_average;

pub use moving_average::{calculate_ema, ema_series};
