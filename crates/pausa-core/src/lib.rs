//! # Pausa Core Library
//!
//! Core business logic for pausa, a work/break interval timer CLI.
//! A single-threaded command loop drives one [`Timer`] at a time; the
//! engine is tick-driven and calls into its collaborators (history log,
//! desktop notifier) only on session boundaries.
//!
//! ## Key components
//!
//! - [`Timer`]: the countdown engine and session lifecycle
//! - [`HistoryLog`]: append-only text log of completed sessions
//! - [`PresetStore`]: saved duration presets, selected by position
//! - [`Config`]: TOML application configuration
//! - [`DesktopNotifier`]: best-effort popups and tone playback

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, HistoryError, PresetError};
pub use events::Event;
pub use notify::{DesktopNotifier, Notifier, SilentNotifier};
pub use storage::{
    Config, HistoryLog, HistoryRecord, HistorySink, PresetStore, SavedPreset, SessionType,
    TotalsSnapshot,
};
pub use timer::{DurationConfig, Phase, Timer, TimerStats};
