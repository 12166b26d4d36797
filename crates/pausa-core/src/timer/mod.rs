mod durations;
mod engine;

pub use durations::DurationConfig;
pub use engine::{Phase, Timer, TimerStats};
