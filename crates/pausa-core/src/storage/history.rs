//! Append-only session history log.
//!
//! One fixed textual block per completed session, human-readable, never
//! truncated or rewritten. The block layout is the only structure the file
//! guarantees; [`HistoryLog::last_totals`] leans on it to recover the most
//! recent running totals for the standalone stats report.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, HistoryError};

const SEPARATOR: &str = "----------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Work,
    Break,
}

impl SessionType {
    fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work",
            SessionType::Break => "Break",
        }
    }
}

/// One completed session, write-only from the engine's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub session_type: SessionType,
    /// Localized wall-clock time the session completed, preformatted.
    pub timestamp_local: String,
    pub duration_minutes: u32,
    pub total_work_minutes: u32,
    pub total_break_minutes: u32,
    pub completed_work_sessions: u32,
}

impl HistoryRecord {
    fn render(&self) -> String {
        format!(
            "[{}] {}\n  duration: {} min\n  total work: {} min\n  total break: {} min\n  completed work sessions: {}\n{}\n",
            self.session_type.label(),
            self.timestamp_local,
            self.duration_minutes,
            self.total_work_minutes,
            self.total_break_minutes,
            self.completed_work_sessions,
            SEPARATOR,
        )
    }
}

/// Running totals recovered from the final block of the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsSnapshot {
    pub total_work_minutes: u32,
    pub total_break_minutes: u32,
    pub completed_work_sessions: u32,
}

/// The seam between the timer engine and durable history storage.
///
/// Append failures are fatal by policy; implementations must not swallow
/// them.
pub trait HistorySink {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), CoreError>;
}

/// File-backed history log.
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// Log at the default location, `<data_dir>/history.log`.
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::open_at(data_dir()?.join("history.log")))
    }

    /// Log at an explicit path (tests use a temp directory).
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw log contents for display. A missing file is not an error; it
    /// reads as `None` ("no history yet").
    pub fn read(&self) -> Result<Option<String>, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(HistoryError::ReadFailed {
                path: self.path.clone(),
                source: e,
            }
            .into()),
        }
    }

    /// Running totals from the final record, or `None` when no history
    /// exists yet. Relies only on the fixed block layout.
    pub fn last_totals(&self) -> Result<Option<TotalsSnapshot>, CoreError> {
        let Some(contents) = self.read()? else {
            return Ok(None);
        };

        let mut totals = None;
        let mut current = TotalsSnapshot::default();
        for line in contents.lines() {
            if let Some(value) = parse_field(line, "  total work: ", " min") {
                current.total_work_minutes = value;
            } else if let Some(value) = parse_field(line, "  total break: ", " min") {
                current.total_break_minutes = value;
            } else if let Some(value) = parse_field(line, "  completed work sessions: ", "") {
                current.completed_work_sessions = value;
            } else if line == SEPARATOR {
                totals = Some(current);
            }
        }
        Ok(totals)
    }
}

fn parse_field(line: &str, prefix: &str, suffix: &str) -> Option<u32> {
    line.strip_prefix(prefix)?
        .strip_suffix(suffix)?
        .parse()
        .ok()
}

impl HistorySink for HistoryLog {
    fn append(&mut self, record: &HistoryRecord) -> Result<(), CoreError> {
        let map_err = |e| {
            CoreError::from(HistoryError::AppendFailed {
                path: self.path.clone(),
                source: e,
            })
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(map_err)?;
        file.write_all(record.render().as_bytes()).map_err(map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(session_type: SessionType, n: u32) -> HistoryRecord {
        HistoryRecord {
            session_type,
            timestamp_local: "2026-08-30 09:00:00".into(),
            duration_minutes: 25,
            total_work_minutes: 25 * n,
            total_break_minutes: 5 * n,
            completed_work_sessions: n,
        }
    }

    #[test]
    fn missing_log_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let log = HistoryLog::open_at(dir.path().join("history.log"));
        assert!(log.read().unwrap().is_none());
        assert!(log.last_totals().unwrap().is_none());
    }

    #[test]
    fn append_grows_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = HistoryLog::open_at(dir.path().join("history.log"));
        log.append(&record(SessionType::Work, 1)).unwrap();
        log.append(&record(SessionType::Break, 1)).unwrap();

        let contents = log.read().unwrap().unwrap();
        assert_eq!(contents.matches("[Work]").count(), 1);
        assert_eq!(contents.matches("[Break]").count(), 1);
        assert_eq!(contents.matches(SEPARATOR).count(), 2);
    }

    #[test]
    fn block_format_is_stable() {
        let rendered = record(SessionType::Work, 2).render();
        assert_eq!(
            rendered,
            "[Work] 2026-08-30 09:00:00\n  duration: 25 min\n  total work: 50 min\n  total break: 10 min\n  completed work sessions: 2\n----------------------------------------\n"
        );
    }

    #[test]
    fn last_totals_reads_the_final_block() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = HistoryLog::open_at(dir.path().join("history.log"));
        log.append(&record(SessionType::Work, 1)).unwrap();
        log.append(&record(SessionType::Work, 3)).unwrap();

        let totals = log.last_totals().unwrap().unwrap();
        assert_eq!(totals.total_work_minutes, 75);
        assert_eq!(totals.total_break_minutes, 15);
        assert_eq!(totals.completed_work_sessions, 3);
    }

    #[test]
    fn append_to_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = HistoryLog::open_at(dir.path().join("no-such-dir").join("history.log"));
        assert!(log.append(&record(SessionType::Work, 1)).is_err());
    }
}
