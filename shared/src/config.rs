use crate::hotkey::Hotkey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration stored in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global capture shortcut, e.g. "Ctrl+Alt+H"
    #[serde(default = "default_hotkey_capture")]
    pub hotkey_capture: String,
    /// Log filter level written to the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_hotkey_capture() -> String {
    Hotkey::DEFAULT.to_string()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hotkey_capture: default_hotkey_capture(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// The configured capture hotkey, or the default if it does not parse.
    pub fn capture_hotkey(&self) -> Hotkey {
        self.hotkey_capture.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, fallback = %Hotkey::DEFAULT, "using default capture hotkey");
            Hotkey::DEFAULT
        })
    }
}

pub const APP_DIR: &str = "HexHunter";

/// Per-user directory holding config.json and the log file
pub fn app_dir() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}

pub fn config_path() -> PathBuf {
    app_dir().join("config.json")
}

pub fn load_config() -> AppConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
            return AppConfig::default();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "config invalid, using defaults");
        AppConfig::default()
    })
}

pub fn save_config(config: &AppConfig) {
    save_config_to(&config_path(), config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let data = serde_json::to_string_pretty(config).unwrap_or_default();
    if let Err(e) = fs::write(path, data) {
        tracing::warn!(path = %path.display(), error = %e, "config not saved");
    }
}
