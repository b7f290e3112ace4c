//! CLI settings
//!
//! Non-secret configuration lives in a plain JSON file, by default
//! `settings.json` under the platform config directory. A missing default
//! file means defaults; a file named with `--config` must exist.

use directories::ProjectDirs;
use seo_api::{ApiConfig, BackendKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CliError, Result};

/// Current settings file version
pub const SETTINGS_VERSION: u32 = 1;

const SETTINGS_FILE: &str = "settings.json";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Settings file version
    pub version: u32,
    /// API backend selection
    pub api: ApiConfig,
    /// Wallet file used when `--wallet` is not given
    pub wallet_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            api: ApiConfig::default(),
            wallet_path: PathBuf::from(wallet_core::DEFAULT_WALLET_PATH),
        }
    }
}

/// Command-line and environment overrides applied on top of the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub backend: Option<BackendKind>,
    pub base_url: Option<String>,
}

impl Settings {
    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "aipseo", "aipseo").map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from an explicit file or the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::FileNotFound(path.to_path_buf()));
                }
                Self::load_from_file(path)
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => {
                    debug!("No settings file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load settings from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|e| CliError::Settings {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Apply command-line and environment overrides
    pub fn apply(mut self, overrides: &Overrides) -> Self {
        if let Some(backend) = overrides.backend {
            self.api.backend = backend;
        }
        if let Some(base_url) = &overrides.base_url {
            self.api.base_url = base_url.clone();
        }
        self
    }
}
