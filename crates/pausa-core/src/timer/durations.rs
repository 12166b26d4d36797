use serde::{Deserialize, Serialize};

/// The four durations a timer is built from, all in seconds except the
/// cycle count. Immutable once a [`Timer`](super::Timer) is constructed
/// from it.
///
/// The core assumes every field is positive; callers substitute defaults
/// when user input is blank, unparsable, or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationConfig {
    /// Work interval length in seconds.
    pub work_secs: u32,
    /// Short break length in seconds.
    pub short_break_secs: u32,
    /// Long break length in seconds.
    pub long_break_secs: u32,
    /// Completed work sessions before a long break is due.
    pub cycles_before_long_break: u32,
}

impl DurationConfig {
    pub fn new(
        work_secs: u32,
        short_break_secs: u32,
        long_break_secs: u32,
        cycles_before_long_break: u32,
    ) -> Self {
        Self {
            work_secs,
            short_break_secs,
            long_break_secs,
            cycles_before_long_break,
        }
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_secs / 60
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break_secs / 60
    }
}

impl Default for DurationConfig {
    /// The classic 25/5/15-minute split with a long break every 4th cycle.
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            cycles_before_long_break: 4,
        }
    }
}
