//! Configuration for the screen buffer

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::size::{ConfiguredWidth, FixedWidth, TtyWidth};

/// Screen buffer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compensate for lines that wrap at the terminal edge.
    /// Turn off for fixed-geometry output such as selection menus.
    pub wrap_aware: bool,
    /// Columns subtracted from a line's visible length before working out
    /// how many rows it wrapped onto
    pub display_margin: usize,
    /// Fixed terminal width; when unset the terminal is queried
    pub columns: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_aware: true,
            display_margin: 2,
            columns: None,
        }
    }
}

impl Config {
    /// Width source for these settings: the fixed width if one is set,
    /// otherwise the terminal behind stdout
    pub fn width_source(&self) -> ConfiguredWidth {
        match self.columns {
            Some(columns) => ConfiguredWidth::Fixed(FixedWidth(columns)),
            None => ConfiguredWidth::Terminal(TtyWidth::stdout()),
        }
    }

    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        if config.columns == Some(0) {
            return Err(ConfigError::Invalid(
                "columns must be positive; leave it unset to query the terminal",
            ));
        }
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Save configuration as pretty-printed JSON, creating parent
    /// directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_error)?;
        }
        let mut json = serde_json::to_string_pretty(self).map_err(ConfigError::Parse)?;
        json.push('\n');
        fs::write(path, json).map_err(write_error)
    }

    /// Path of the user's config file: `$SCREENBUF_CONFIG` if set, else
    /// `screenbuf/config.json` under `$XDG_CONFIG_HOME` or `~/.config`
    pub fn default_path() -> Option<PathBuf> {
        config_path(
            env::var_os(CONFIG_ENV),
            env::var_os("XDG_CONFIG_HOME"),
            env::var_os("HOME"),
        )
    }

    /// Load the user's config file, falling back to defaults when there is
    /// none. A file that exists but cannot be used is reported and ignored.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path().filter(|path| path.exists()) else {
            return Self::default();
        };

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config: {}", e);
            Self::default()
        })
    }
}

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SCREENBUF_CONFIG";

fn config_path(
    explicit: Option<OsString>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Option<PathBuf> {
    let non_empty = |value: Option<OsString>| value.filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(path) = non_empty(explicit) {
        return Some(path);
    }

    non_empty(xdg_config_home)
        .or_else(|| non_empty(home).map(|home| home.join(".config")))
        .map(|dir| dir.join("screenbuf").join("config.json"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}
