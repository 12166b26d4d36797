use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the timer produces an Event.
/// The command loop prints them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        phase: Phase,
        session_number: u32,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A countdown ran to exhaustion. Emitted after the history record has
    /// been written and the phase toggled, so `next_phase` is the phase the
    /// next `start()` will run.
    SessionCompleted {
        completed_phase: Phase,
        next_phase: Phase,
        current_cycle: u32,
        at: DateTime<Utc>,
    },
    SessionStopped {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
}
