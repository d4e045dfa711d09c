//! The `Config` struct and its persistence.

use crate::error::ConfigError;
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// muxpod settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Remote
    // ========================================================================
    /// tmux binary on the remote host
    #[serde(default = "crate::defaults::tmux_path")]
    pub tmux_path: String,

    /// SSH arguments (e.g. `-p 2222 user@host`); unset runs tmux locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh: Option<String>,

    // ========================================================================
    // Synchronization
    // ========================================================================
    /// Milliseconds between pane captures
    #[serde(default = "crate::defaults::poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Lines of history kept in each pane mirror
    #[serde(default = "crate::defaults::scrollback_lines")]
    pub scrollback_lines: usize,

    /// Capture with `-e` so colours and attributes are mirrored
    #[serde(default = "crate::defaults::bool_true")]
    pub preserve_escapes: bool,

    /// Query the cursor position after every capture
    #[serde(default = "crate::defaults::bool_false")]
    pub track_cursor: bool,

    /// Outstanding captures per pane before ticks are skipped
    #[serde(default = "crate::defaults::max_in_flight")]
    pub max_in_flight: usize,

    // ========================================================================
    // Navigation
    // ========================================================================
    /// Concurrent `list-panes` calls while refreshing a session tree
    #[serde(default = "crate::defaults::listing_concurrency")]
    pub listing_concurrency: usize,

    // ========================================================================
    // Logging
    // ========================================================================
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmux_path: crate::defaults::tmux_path(),
            ssh: None,
            poll_interval_ms: crate::defaults::poll_interval_ms(),
            scrollback_lines: crate::defaults::scrollback_lines(),
            preserve_escapes: crate::defaults::bool_true(),
            track_cursor: crate::defaults::bool_false(),
            max_in_flight: crate::defaults::max_in_flight(),
            listing_concurrency: crate::defaults::listing_concurrency(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            if let Err(e) = config.save_to(&config_path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load and validate configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: Config = if contents.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Save to the default path
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("muxpod")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            // ~/.config/muxpod on every Unix, macOS included
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("muxpod")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Reject values the sync engine and navigator cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmux_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tmux_path must not be empty".to_string(),
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.scrollback_lines == 0 {
            return Err(ConfigError::Validation(
                "scrollback_lines must be greater than 0".to_string(),
            ));
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "max_in_flight must be greater than 0".to_string(),
            ));
        }
        if self.listing_concurrency == 0 {
            return Err(ConfigError::Validation(
                "listing_concurrency must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
