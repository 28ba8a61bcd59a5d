mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ValetError;
use defaults::*;

/// Top-level Valet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub valet: ValetConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub alerts: AlertsConfig,
}

/// General assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValetConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ValetConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Reminder engine settings: storage location and loop cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,
    /// Repeat notifications for the same reminder are suppressed inside
    /// this window, across both the scheduler and the watcher.
    #[serde(default = "default_dedup_window")]
    pub dedup_window_secs: u64,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            poll_interval_secs: default_poll_interval(),
            error_backoff_secs: default_error_backoff(),
            dedup_window_secs: default_dedup_window(),
        }
    }
}

/// Watcher config — the tray-style secondary poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_watcher_interval")]
    pub poll_interval_secs: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: default_watcher_interval(),
        }
    }
}

/// Which visual alert backend to use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertBackend {
    /// Styled stdout lines (default, works everywhere).
    #[default]
    Console,
    /// Shell out to a desktop notifier command.
    Desktop,
}

/// Alert and speech sink config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default)]
    pub visual: AlertBackend,
    /// Desktop notifier binary, used when `visual = "desktop"`.
    #[serde(default = "default_notify_command")]
    pub notify_command: String,
    /// Whether due reminders are also spoken aloud.
    #[serde(default)]
    pub speech_enabled: bool,
    /// Text-to-speech binary (e.g. `say` on macOS, `espeak` on Linux).
    #[serde(default = "default_speech_command")]
    pub speech_command: String,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            visual: AlertBackend::default(),
            notify_command: default_notify_command(),
            speech_enabled: false,
            speech_command: default_speech_command(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, ValetError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ValetError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| ValetError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
