//! Tool Preferences
//!
//! Settings that survive between editing sessions: brush radius and count,
//! grid layout, blast overlay display. Stored as pretty JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::blast::BlastOverlaySettings;
use crate::scatter::ScatterConfig;
use crate::world::GridSnapper;

pub const MIN_GRID_SIZE: f32 = 0.01;
pub const MAX_GRID_SIZE: f32 = 10.0;
pub const MIN_ANGULAR_DIVISIONS: u32 = 4;
pub const MAX_ANGULAR_DIVISIONS: u32 = 64;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// All persisted tool settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolPrefs {
    #[serde(default)]
    pub scatter: ScatterConfig,
    #[serde(default)]
    pub snapper: GridSnapper,
    #[serde(default)]
    pub blast: BlastOverlaySettings,
}

impl ToolPrefs {
    /// Load preferences, falling back to defaults when the file is missing.
    ///
    /// Loaded values are clamped into range.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "No preferences file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let prefs: ToolPrefs = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Preferences loaded");
        Ok(prefs.sanitized())
    }

    /// Write preferences as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), "Preferences saved");
        Ok(())
    }

    /// Copy with every field clamped into its supported range.
    pub fn sanitized(&self) -> Self {
        let grid_size = if self.snapper.grid_size.is_finite() {
            self.snapper.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE)
        } else {
            GridSnapper::default().grid_size
        };
        let snapper = GridSnapper {
            grid_size,
            angular_divisions: self
                .snapper
                .angular_divisions
                .clamp(MIN_ANGULAR_DIVISIONS, MAX_ANGULAR_DIVISIONS),
            ..self.snapper
        };

        Self {
            scatter: self.scatter.sanitized(),
            snapper,
            blast: self.blast.sanitized(),
        }
    }
}

/// Default location of the preferences file.
pub fn default_prefs_path() -> PathBuf {
    PathBuf::from("assets/editor/tool_prefs.json")
}
