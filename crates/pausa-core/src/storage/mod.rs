mod config;
pub mod history;
pub mod presets;

pub use config::{Config, DurationsConfig, NotificationsConfig};
pub use history::{HistoryLog, HistoryRecord, HistorySink, SessionType, TotalsSnapshot};
pub use presets::{PresetStore, SavedPreset};

use std::path::PathBuf;

/// Returns `~/.config/pausa[-dev]/` based on PAUSA_ENV.
///
/// Set PAUSA_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PAUSA_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pausa-dev")
    } else {
        base_dir.join("pausa")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
