//! Configuration settings for the Gophermart client.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Prefix of environment overrides, e.g. `GOPHERMART_API__BASE_URL`.
const ENV_PREFIX: &str = "GOPHERMART";
/// Older single-variable override for the backend address.
const LEGACY_ADDR_VAR: &str = "GOPHERMART_API_ADDR";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from the default locations.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration, layering defaults, the config file and the
    /// process environment.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`Config::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<PathBuf>,
        env: Option<HashMap<String, String>>,
    ) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);
        debug!(path = %config_path.display(), "Loading configuration");

        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| crate::Error::config(e.to_string()))?;
        let legacy_addr = match &env {
            Some(vars) => vars.get(LEGACY_ADDR_VAR).cloned(),
            None => std::env::var(LEGACY_ADDR_VAR).ok(),
        };

        let mut loaded: Self = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| crate::Error::config(e.to_string()))?;

        if let Some(addr) = legacy_addr.filter(|a| !a.trim().is_empty()) {
            loaded.api.base_url = addr;
        }
        Ok(loaded)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Gophermart backend base URL.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// How long inline alerts stay up.
    pub alert_duration_secs: u64,
    /// Show status bar.
    pub show_status_bar: bool,
    /// Location opened at start-up.
    pub start_path: String,
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn alert_duration(&self) -> Duration {
        Duration::from_secs(self.alert_duration_secs)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            alert_duration_secs: 3,
            show_status_bar: true,
            start_path: "/".to_string(),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Edit the location bar.
    pub location: String,
    /// Submit the focused form.
    pub submit: String,
    /// Cancel/back.
    pub back: String,
    /// Move focus to the next input.
    pub next_field: String,
    /// Switch between accrue and withdraw.
    pub toggle_action: String,
    /// Refresh orders.
    pub refresh: String,
    /// Show or hide the withdrawal history.
    pub withdrawals: String,
    /// End the session.
    pub logout: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "Ctrl+c".to_string(),
            help: "F1".to_string(),
            location: "Ctrl+l".to_string(),
            submit: "Enter".to_string(),
            back: "Esc".to_string(),
            next_field: "Tab".to_string(),
            toggle_action: "Ctrl+a".to_string(),
            refresh: "Ctrl+u".to_string(),
            withdrawals: "Ctrl+w".to_string(),
            logout: "Ctrl+o".to_string(),
        }
    }
}
