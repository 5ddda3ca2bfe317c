// SPDX-License-Identifier: MIT
//
// Per-user locations for ked's log and config files.

use std::path::PathBuf;

/// Directory holding `ked.log`.
pub fn user_log_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("LOCALAPPDATA")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join("ked")
            .join("logs")
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join("Library")
            .join("Logs")
            .join("ked")
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Some(state_home) = std::env::var_os("XDG_STATE_HOME").map(PathBuf::from) {
            return state_home.join("ked").join("logs");
        }
        std::env::var_os("HOME")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join(".local")
            .join("state")
            .join("ked")
            .join("logs")
    }
}

/// `$XDG_CONFIG_HOME/ked/ked.toml` (or the platform equivalent).
pub fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join("ked")
            .join("ked.toml")
    }

    #[cfg(not(target_os = "windows"))]
    {
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
            return config_home.join("ked").join("ked.toml");
        }
        std::env::var_os("HOME")
            .map_or_else(std::env::temp_dir, PathBuf::from)
            .join(".config")
            .join("ked")
            .join("ked.toml")
    }
}
