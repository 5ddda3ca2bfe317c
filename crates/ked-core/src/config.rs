//! Editor configuration loaded from TOML.
//!
//! ```toml
//! tab_stop = 4
//! jump_list_capacity = 100
//! max_windows = 16
//! wrap = false
//! gutter = true
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values. Unknown
//! keys are rejected so typos surface instead of being silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::jumplist::JUMPLIST_MAX;
use crate::row::{DEFAULT_TAB_STOP, MAX_TAB_STOP};
use crate::window::DisplayFlags;

/// Upper bound on live windows unless configured otherwise.
pub const DEFAULT_MAX_WINDOWS: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {} failed", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config failed")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Columns per tab stop.
    pub tab_stop: usize,

    /// Maximum number of jump-list entries kept.
    pub jump_list_capacity: usize,

    /// Maximum number of simultaneously open windows.
    pub max_windows: usize,

    /// Soft-wrap long lines in new windows.
    pub wrap: bool,

    /// Show the line-number gutter in new windows.
    pub gutter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            jump_list_capacity: JUMPLIST_MAX,
            max_windows: DEFAULT_MAX_WINDOWS,
            wrap: false,
            gutter: true,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when a numeric setting is zero.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise the
    /// same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_TAB_STOP).contains(&self.tab_stop) {
            return Err(ConfigError::Invalid(format!(
                "tab_stop must be between 1 and {MAX_TAB_STOP}"
            )));
        }
        if self.jump_list_capacity == 0 {
            return Err(ConfigError::Invalid(
                "jump_list_capacity must be at least 1".into(),
            ));
        }
        if self.max_windows == 0 {
            return Err(ConfigError::Invalid("max_windows must be at least 1".into()));
        }
        Ok(())
    }

    /// Display flags a freshly created window starts with.
    #[must_use]
    pub fn display_flags(&self) -> DisplayFlags {
        let mut flags = DisplayFlags::empty();
        flags.set(DisplayFlags::WRAP, self.wrap);
        flags.set(DisplayFlags::GUTTER, self.gutter);
        flags
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
