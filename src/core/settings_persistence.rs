//! Settings persistence
//!
//! Saves and loads [`GameplaySettings`] as JSON in the user's configuration
//! directory (for example `~/.config/xfchess/settings.json`), falling back to
//! `./settings.json` when no config directory can be resolved.
//!
//! Load failures fall back to default settings. Save failures are logged and
//! otherwise ignored so a read-only disk never interrupts a game.

use crate::core::error::CoreResult;
use crate::core::GameplaySettings;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Path of `settings.json` in the user's configuration directory
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "XFChess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Read settings from `path`
pub fn read_settings(path: &Path) -> CoreResult<GameplaySettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write settings to `path`, creating parent directories
pub fn write_settings(path: &Path, settings: &GameplaySettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load settings, using defaults when the file is missing or invalid
pub fn load_settings(path: &Path) -> GameplaySettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return GameplaySettings::default();
    }

    match read_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            GameplaySettings::default()
        }
    }
}

/// Save settings, logging instead of failing
pub fn save_settings(path: &Path, settings: &GameplaySettings) {
    match write_settings(path, settings) {
        Ok(()) => info!("[SETTINGS] Saved settings to {:?}", path),
        Err(e) => error!("[SETTINGS] Failed to save settings to {:?}: {}", path, e),
    }
}
