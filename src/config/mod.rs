// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of `settings.toml`.
//!
//! # Examples
//!
//! ```no_run
//! use message_bar::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.animate_transitions = Some(false);
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::BufferCapacity;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "MessageBar";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Start processing submissions as soon as the queue exists.
    #[serde(default)]
    pub autostart: Option<bool>,
    /// Animate transitions the queue starts on its own.
    #[serde(default)]
    pub animate_transitions: Option<bool>,
    #[serde(default)]
    pub diagnostics_capacity: Option<usize>,
    #[serde(default)]
    pub demo_duration_secs: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autostart: Some(DEFAULT_AUTOSTART),
            animate_transitions: Some(DEFAULT_ANIMATE_TRANSITIONS),
            diagnostics_capacity: Some(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
            demo_duration_secs: Some(DEFAULT_DEMO_DURATION_SECS),
        }
    }
}

impl Config {
    #[must_use]
    pub fn autostart(&self) -> bool {
        self.autostart.unwrap_or(DEFAULT_AUTOSTART)
    }

    #[must_use]
    pub fn animate_transitions(&self) -> bool {
        self.animate_transitions
            .unwrap_or(DEFAULT_ANIMATE_TRANSITIONS)
    }

    #[must_use]
    pub fn diagnostics_capacity(&self) -> BufferCapacity {
        BufferCapacity::new(
            self.diagnostics_capacity
                .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
        )
    }

    /// Demo auto-hide delay, clamped to `0..=MAX_DEMO_DURATION_SECS`.
    #[must_use]
    pub fn demo_duration_secs(&self) -> f64 {
        let secs = self
            .demo_duration_secs
            .unwrap_or(DEFAULT_DEMO_DURATION_SECS);
        if secs.is_finite() {
            secs.clamp(0.0, MAX_DEMO_DURATION_SECS)
        } else {
            DEFAULT_DEMO_DURATION_SECS
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the user's settings, or defaults if none are saved.
///
/// # Errors
///
/// Returns an error if the settings file exists but cannot be read.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Saves settings to the user's config directory.
///
/// # Errors
///
/// Returns an error if the file cannot be serialized or written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads settings from `path`; unparsable TOML falls back to defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid settings in {}: {}", path.display(), err);
            Ok(Config::default())
        }
    }
}

/// Saves settings to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be serialized or written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
