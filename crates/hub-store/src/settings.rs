//! Store settings loaded from disk at startup.
//!
//! Settings live in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/org.hub.Hub/
//! - Windows: %APPDATA%/hub/Hub/config/
//! - Linux: ~/.config/hub/
//!
//! Thresholds are read once when the store is built. Nothing updates them
//! afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::DEFAULT_MINIMUM_POINTS;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "hub";
const APP_NAME: &str = "Hub";
const CONFIG_FILENAME: &str = "store.toml";

/// Settings for constructing a [`Store`](crate::Store).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub thresholds: ThresholdSettings,
}

/// Point thresholds used by project and subject gamification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSettings {
    pub minimum_project_points: u32,
    pub minimum_subject_points: u32,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            minimum_project_points: DEFAULT_MINIMUM_POINTS,
            minimum_subject_points: DEFAULT_MINIMUM_POINTS,
        }
    }
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from a specific path.
///
/// A missing file yields defaults. A file that exists but cannot be read
/// or parsed is an error.
pub fn load_settings(path: &Path) -> Result<StoreSettings> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let settings = toml::from_str(&content)?;
            tracing::info!("Loaded store settings from {:?}", path);
            Ok(settings)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No store settings at {:?}, using defaults", path);
            Ok(StoreSettings::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Load settings from the default path, falling back to defaults on any
/// failure.
pub fn load_or_default() -> StoreSettings {
    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return StoreSettings::default();
    };

    load_settings(&path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load store settings: {}, using defaults", e);
        StoreSettings::default()
    })
}
