// Order execution: pacing and the single-pass ladder runner
pub mod pacing;
pub mod runner;

pub use pacing::OrderPacer;
pub use runner::{LadderRunner, RunOutcome, RunReport};
