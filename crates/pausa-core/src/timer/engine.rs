//! Timer state machine.
//!
//! The engine is tick-driven: it has no internal thread, and the caller is
//! responsible for calling `tick()` once per second while a session runs.
//! Every state change produces an [`Event`]; operations whose precondition
//! does not hold return `None` so the caller can warn and move on.
//!
//! ## Session flow
//!
//! ```text
//! start -> (tick x N) -> complete -> [confirm] -> start -> ...
//!            |  ^
//!         pause/resume
//! ```
//!
//! On completion the engine books the accumulators, appends a history
//! record (a failure there is fatal and propagates), toggles the phase,
//! and only then fires the end-of-session notification. The interleaving
//! is observable and deliberate.

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

use super::durations::DurationConfig;
use crate::events::Event;
use crate::notify::Notifier;
use crate::storage::{HistoryRecord, HistorySink, SessionType};

/// Logical session type, independent of the running/paused flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Conceptually the pre-start state; the modeled flow never re-enters it.
    Idle,
    Working,
    OnBreak,
}

/// Read-only counters the engine exposes outward.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimerStats {
    pub session_number: u32,
    pub current_cycle: u32,
    pub completed_work_sessions: u32,
    pub total_work_secs: u64,
    pub total_break_secs: u64,
}

/// The countdown engine and session lifecycle.
///
/// Holds its collaborators behind seams: a [`HistorySink`] whose append
/// failures are fatal, and a [`Notifier`] that is best-effort and
/// infallible from the engine's point of view.
pub struct Timer {
    config: DurationConfig,
    phase: Phase,
    running: bool,
    paused: bool,
    remaining_secs: u32,
    session_number: u32,
    current_cycle: u32,
    total_work_secs: u64,
    total_break_secs: u64,
    completed_work_sessions: u32,
    history: Box<dyn HistorySink>,
    notifier: Box<dyn Notifier>,
}

impl Timer {
    /// Create a timer from a duration config.
    ///
    /// Starts with `phase = Working`, the work duration loaded, and all
    /// accumulators zero. Nothing ticks until `start()`.
    pub fn new(
        config: DurationConfig,
        history: Box<dyn HistorySink>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            phase: Phase::Working,
            running: false,
            paused: false,
            remaining_secs: config.work_secs,
            session_number: 1,
            current_cycle: 0,
            total_work_secs: 0,
            total_break_secs: 0,
            completed_work_sessions: 0,
            config,
            history,
            notifier,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn session_number(&self) -> u32 {
        self.session_number
    }

    pub fn current_cycle(&self) -> u32 {
        self.current_cycle
    }

    pub fn config(&self) -> &DurationConfig {
        &self.config
    }

    pub fn stats(&self) -> TimerStats {
        TimerStats {
            session_number: self.session_number,
            current_cycle: self.current_cycle,
            completed_work_sessions: self.completed_work_sessions,
            total_work_secs: self.total_work_secs,
            total_break_secs: self.total_break_secs,
        }
    }

    /// Duration the current phase counts down from.
    fn phase_duration(&self) -> u32 {
        match self.phase {
            Phase::OnBreak => self.config.short_break_secs,
            Phase::Idle | Phase::Working => self.config.work_secs,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin the current phase's countdown.
    ///
    /// Returns `None` while already running; the caller warns.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        self.paused = false;
        self.remaining_secs = self.phase_duration();

        let (title, body) = match self.phase {
            Phase::OnBreak => (
                "Break started",
                format!("Session {}: rest for {}", self.session_number, human_duration(self.remaining_secs)),
            ),
            Phase::Idle | Phase::Working => (
                "Work session started",
                format!("Session {}: focus for {}", self.session_number, human_duration(self.remaining_secs)),
            ),
        };
        self.notifier.notify(title, &body);

        Some(Event::SessionStarted {
            phase: self.phase,
            session_number: self.session_number,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Suspend a running countdown; `remaining_secs` is retained.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running || self.paused {
            return None;
        }
        self.paused = true;
        Some(Event::SessionPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Resume a paused countdown from the retained `remaining_secs`.
    pub fn resume(&mut self) -> Option<Event> {
        if !self.paused {
            return None;
        }
        self.paused = false;
        Some(Event::SessionResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Halt the countdown. The outer loop then asks the user whether to
    /// begin a brand-new setup flow or exit; that outcome never lives in
    /// the engine.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        self.paused = false;
        Some(Event::SessionStopped {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Reinitialize in place: back to session 1 of a fresh Working phase.
    /// The lifetime accumulators are retained.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.paused = false;
        self.phase = Phase::Working;
        self.current_cycle = 0;
        self.session_number = 1;
        self.remaining_secs = self.config.work_secs;
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance the countdown by one second. Call once per second while a
    /// session runs; a no-op unless running and unpaused.
    ///
    /// Returns `Ok(Some(SessionCompleted))` on exhaustion. This is the only
    /// path that drives phase completion.
    ///
    /// # Errors
    ///
    /// A history append failure is fatal by policy and propagates.
    pub fn tick(&mut self) -> Result<Option<Event>, crate::error::CoreError> {
        if !self.running || self.paused {
            return Ok(None);
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
        if self.remaining_secs > 0 {
            return Ok(None);
        }
        self.running = false;
        self.complete_session().map(Some)
    }

    /// Session completion, reachable only from tick exhaustion.
    fn complete_session(&mut self) -> Result<Event, crate::error::CoreError> {
        let completed_phase = self.phase;
        let (session_type, duration_secs) = match completed_phase {
            Phase::Idle | Phase::Working => {
                self.total_work_secs += u64::from(self.config.work_secs);
                self.completed_work_sessions += 1;
                (SessionType::Work, self.config.work_secs)
            }
            Phase::OnBreak => {
                // Breaks always book the short-break length. The config
                // carries long_break_secs and cycles_before_long_break, but
                // completion never consults them; kept as observed in the
                // source behavior.
                self.total_break_secs += u64::from(self.config.short_break_secs);
                (SessionType::Break, self.config.short_break_secs)
            }
        };

        let record = HistoryRecord {
            session_type,
            timestamp_local: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            duration_minutes: duration_secs / 60,
            total_work_minutes: (self.total_work_secs / 60) as u32,
            total_break_minutes: (self.total_break_secs / 60) as u32,
            completed_work_sessions: self.completed_work_sessions,
        };
        self.history.append(&record)?;

        self.phase = match completed_phase {
            Phase::Idle | Phase::Working => Phase::OnBreak,
            Phase::OnBreak => Phase::Working,
        };
        self.current_cycle += 1;
        self.session_number += 1;

        // End-of-session notification fires after the toggle and the
        // history write; the interleaving is observable.
        let (title, body) = match completed_phase {
            Phase::Idle | Phase::Working => {
                ("Work session complete", "Time for a break.")
            }
            Phase::OnBreak => ("Break over", "Back to work."),
        };
        self.notifier.notify(title, body);
        self.notifier.play_tone();

        Ok(Event::SessionCompleted {
            completed_phase,
            next_phase: self.phase,
            current_cycle: self.current_cycle,
            at: Utc::now(),
        })
    }
}

fn human_duration(secs: u32) -> String {
    if secs >= 60 && secs % 60 == 0 {
        format!("{} min", secs / 60)
    } else {
        format!("{} sec", secs)
    }
}
