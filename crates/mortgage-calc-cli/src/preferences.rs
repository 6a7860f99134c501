//! Persisted display preferences: a single dark-mode flag.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Overrides the directory holding `preferences.json`.
pub const CONFIG_DIR_ENV: &str = "MORTGAGE_CALC_CONFIG_DIR";

const APP_DIR: &str = "mortgage-calc";
const PREFERENCES_FILE: &str = "preferences.json";

/// Display theme for terminal output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(default)]
    dark_mode: bool,
}

/// JSON file store for [`Theme`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        PreferenceStore {
            path: dir.join(PREFERENCES_FILE),
        }
    }

    /// `$MORTGAGE_CALC_CONFIG_DIR`, else the platform config directory.
    pub fn locate() -> Option<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Some(Self::in_dir(Path::new(&dir)));
        }
        dirs::config_dir().map(|dir| Self::in_dir(&dir.join(APP_DIR)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved theme; light when nothing usable is stored.
    pub fn load_theme(&self) -> Theme {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("no preferences at {}: {}", self.path.display(), e);
                return Theme::default();
            }
        };
        match serde_json::from_str::<Preferences>(&contents) {
            Ok(prefs) if prefs.dark_mode => Theme::Dark,
            Ok(_) => Theme::Light,
            Err(e) => {
                debug!("ignoring unreadable preferences {}: {}", self.path.display(), e);
                Theme::default()
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
        }
        let prefs = Preferences {
            dark_mode: theme == Theme::Dark,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&prefs)?)
            .map_err(|e| format!("Failed to write '{}': {}", self.path.display(), e))?;
        info!("saved {} theme to {}", theme.as_str(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_is_light() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(dir.path());
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::in_dir(&dir.path().join("nested"));
        store.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.load_theme(), Theme::Dark);
        store.save_theme(Theme::Light).unwrap();
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn test_corrupt_file_is_light() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PREFERENCES_FILE), "{not json").unwrap();
        let store = PreferenceStore::in_dir(dir.path());
        assert_eq!(store.load_theme(), Theme::Light);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
