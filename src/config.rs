//! Persisted mod settings.
//!
//! Settings live as JSON in the user's config directory. Older installs kept
//! the file in the working directory; it is migrated on first load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::logging;
use crate::types::{Color, LOG_TAG};

pub const SETTINGS_FILENAME: &str = "CityscapeShuffle.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModSettings {
    pub enable_debug_logging: bool,
    /// Fill of the emergency texture shown when no background is available.
    pub fallback_color: Color,
}

impl ModSettings {
    /// Read settings from `path`. A missing file is `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// The loaded settings together with where they are saved.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    settings: ModSettings,
}

impl SettingsStore {
    /// `$HOME/.config/cityscape-shuffle`, or `./.config/...` without `HOME`.
    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("cityscape-shuffle");
        path
    }

    pub fn open() -> Self {
        Self::open_dir(None)
    }

    /// Open settings in `dir`, or in `default_dir()` when none is given.
    /// The legacy file is always looked up in the working directory.
    pub fn open_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::open_in(dir, Path::new(SETTINGS_FILENAME)),
            None => Self::open_in(&Self::default_dir(), Path::new(SETTINGS_FILENAME)),
        }
    }

    /// Load settings from `dir`, migrating `legacy_path` if only that exists,
    /// and writing defaults if neither does. Never fails.
    pub fn open_in(dir: &Path, legacy_path: &Path) -> Self {
        let path = dir.join(SETTINGS_FILENAME);

        if let Some(settings) = read_or_warn(&path) {
            return Self { path, settings };
        }

        if let Some(settings) = read_or_warn(legacy_path) {
            match settings.write(&path) {
                Ok(()) => {
                    info!(
                        "{LOG_TAG} Migrated settings from {} to {}",
                        legacy_path.display(),
                        path.display()
                    );
                    if let Err(e) = fs::remove_file(legacy_path) {
                        warn!("{LOG_TAG} Could not remove {}: {e}", legacy_path.display());
                    }
                }
                Err(e) => warn!("{LOG_TAG} Settings migration failed: {e:#}"),
            }
            return Self { path, settings };
        }

        let settings = ModSettings::default();
        if let Err(e) = settings.write(&path) {
            warn!("{LOG_TAG} {e:#}; falling back to {}", legacy_path.display());
            let path = legacy_path.to_path_buf();
            if let Err(e) = settings.write(&path) {
                warn!("{LOG_TAG} Settings will not be saved: {e:#}");
            }
            return Self { path, settings };
        }
        Self { path, settings }
    }

    pub fn settings(&self) -> &ModSettings {
        &self.settings
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        self.settings.write(&self.path)
    }

    /// Flip the debug-logging switch, apply it, and persist it.
    pub fn set_debug_logging(&mut self, enabled: bool) -> Result<()> {
        self.settings.enable_debug_logging = enabled;
        logging::set_debug_logging(enabled);
        self.save()
    }
}

fn read_or_warn(path: &Path) -> Option<ModSettings> {
    match ModSettings::read(path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{LOG_TAG} Invalid settings ({e:#}), ignoring");
            None
        }
    }
}
