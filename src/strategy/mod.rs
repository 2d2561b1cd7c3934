// Trend-following ladder strategy
pub mod ladder;
pub mod trend;

pub use ladder::plan_ladder;
pub use trend::{classify_trend, TrendReading};
