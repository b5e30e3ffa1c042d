// src/config.rs

//! Configuration file handling
//!
//! The configuration file is optional. It only tells the tool where the
//! conversion tables live:
//!
//! ```toml
//! # ~/.config/spec-cleaner/config.toml
//! data_dir = "/usr/share/spec-cleaner"
//! licenses = "/etc/spec-cleaner/licenses_changes.txt"
//! ```
//!
//! Explicit `licenses` / `pkgconfig` entries win over `data_dir`, which
//! defaults to `$XDG_DATA_HOME/spec-cleaner`.

use crate::error::{Error, Result};
use crate::tables::{ConversionTables, LICENSES_FILE, PKGCONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Application directory name under the XDG base directories
pub const APP_DIR: &str = "spec-cleaner";

/// Settings read from `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CleanerConfig {
    /// Directory holding both conversion tables
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// License alias table, overrides `data_dir`
    #[serde(default)]
    pub licenses: Option<PathBuf>,

    /// pkg-config conversion table, overrides `data_dir`
    #[serde(default)]
    pub pkgconfig: Option<PathBuf>,
}

impl CleanerConfig {
    /// Default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError(format!("Invalid config: {}", e)))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Load the default configuration file, if there is one
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!("Using configuration {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
    }

    /// Resolved path of the license alias table
    pub fn licenses_path(&self) -> Option<PathBuf> {
        self.licenses
            .clone()
            .or_else(|| self.data_dir().map(|dir| dir.join(LICENSES_FILE)))
    }

    /// Resolved path of the pkg-config conversion table
    pub fn pkgconfig_path(&self) -> Option<PathBuf> {
        self.pkgconfig
            .clone()
            .or_else(|| self.data_dir().map(|dir| dir.join(PKGCONFIG_FILE)))
    }

    /// Load both tables
    ///
    /// Files named explicitly must exist. Files only implied by the data
    /// directory are skipped with a warning when missing.
    pub fn load_tables(&self) -> Result<ConversionTables> {
        let licenses = resolve_table(self.licenses.is_some(), self.licenses_path());
        let pkgconfig = resolve_table(self.pkgconfig.is_some(), self.pkgconfig_path());
        ConversionTables::load(licenses.as_deref(), pkgconfig.as_deref())
    }
}

fn resolve_table(explicit: bool, path: Option<PathBuf>) -> Option<PathBuf> {
    match path {
        Some(path) if explicit || path.exists() => Some(path),
        Some(path) => {
            warn!(
                "Conversion table {} not found, continuing without it",
                path.display()
            );
            None
        }
        None => None,
    }
}
