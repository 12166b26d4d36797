//! Persisted duration presets.
//!
//! An ordered sequence of [`DurationConfig`]s in a TOML file, rewritten
//! wholesale on each save. Presets are identified by 1-based position;
//! reordering and deletion are not supported. The CLI is single-user and
//! single-process, so there is no locking.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{CoreError, PresetError};
use crate::timer::DurationConfig;

/// One saved preset. A thin wrapper so the store file has room to grow
/// without breaking the sequence layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPreset {
    #[serde(flatten)]
    pub config: DurationConfig,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<SavedPreset>,
}

/// TOML-backed preset store.
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Store at the default location, `<data_dir>/presets.toml`.
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::open_at(data_dir()?.join("presets.toml")))
    }

    /// Store at an explicit path (tests use a temp directory).
    pub fn open_at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved presets in insertion order. A missing or malformed store
    /// file is treated as empty, never fatal.
    pub fn load_all(&self) -> Vec<SavedPreset> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|contents| toml::from_str::<PresetFile>(&contents).ok())
            .map(|file| file.presets)
            .unwrap_or_default()
    }

    /// Append a preset: read the current sequence, push, rewrite the file.
    pub fn append(&self, preset: SavedPreset) -> Result<(), CoreError> {
        let mut presets = self.load_all();
        presets.push(preset);
        let contents = toml::to_string_pretty(&PresetFile { presets })
            .map_err(PresetError::SerializeFailed)?;
        std::fs::write(&self.path, contents).map_err(|e| PresetError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open_at(dir.path().join("presets.toml"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn malformed_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets.toml");
        std::fs::write(&path, "not [valid } toml").unwrap();
        let store = PresetStore::open_at(path);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn append_then_load_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open_at(dir.path().join("presets.toml"));

        let configs = [
            DurationConfig::new(1500, 300, 900, 4),
            DurationConfig::new(3000, 600, 1800, 2),
            DurationConfig::new(90, 30, 60, 6),
        ];
        for config in configs {
            store.append(SavedPreset { config }).unwrap();
        }

        let loaded = store.load_all();
        assert_eq!(loaded.len(), 3);
        for (saved, config) in loaded.iter().zip(configs) {
            assert_eq!(saved.config, config);
        }
    }

    #[test]
    fn save_to_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PresetStore::open_at(dir.path().join("no-such-dir").join("presets.toml"));
        let preset = SavedPreset {
            config: DurationConfig::default(),
        };
        assert!(store.append(preset).is_err());
    }
}
