//! User preferences persisted as TOML under the platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{LiftTextError, Result};
use crate::ocr::OcrConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub ocr: OcrConfig,
    pub ui: UiPreferences,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub dark_mode: bool,
    /// Directory the open dialog starts in.
    pub last_directory: Option<PathBuf>,
    pub side_panel_width: f32,
    pub text_panel_width: f32,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            last_directory: None,
            side_panel_width: 220.0,
            text_panel_width: 320.0,
        }
    }
}

impl Preferences {
    /// `<config dir>/lifttext/settings.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lifttext").join("settings.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| LiftTextError::Settings(e.to_string()))
    }

    /// Load from `path`, falling back to defaults when missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| LiftTextError::Settings(e.to_string()))?;
        std::fs::write(path, contents)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}
