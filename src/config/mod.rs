//! Application configuration persisted across runs
//!
//! Loaded once on startup and written back on every change, replacing the
//! ambient per-preference storage keys the settings used to live in. A
//! missing or malformed config.json yields defaults; it is never fatal.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ollama::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-level settings: model selection and display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Model identifier sent with every completion request
    #[serde(default = "default_model")]
    pub selected_model: String,
    /// Base URL of the inference server
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Display preferences, kept for parity with the original UI settings
    #[serde(default = "default_font_size")]
    pub font_size: u8,
    #[serde(default)]
    pub theme: Theme,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_OLLAMA_URL.to_string()
}

fn default_font_size() -> u8 {
    14
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            selected_model: default_model(),
            base_url: default_base_url(),
            font_size: default_font_size(),
            theme: Theme::default(),
        }
    }
}

/// Load/save lifecycle for [`AppConfig`]
pub struct ConfigStorage {
    base_path: PathBuf,
}

impl ConfigStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn config_path(&self) -> PathBuf {
        self.base_path.join("config.json")
    }

    /// Load the config, falling back to defaults on absence or corruption.
    pub fn load(&self) -> AppConfig {
        let path = self.config_path();
        if !path.exists() {
            return AppConfig::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Discarding malformed config {:?}: {}", path, e);
                    AppConfig::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {:?}: {}", path, e);
                AppConfig::default()
            }
        }
    }

    /// Persist the config. Called after every change.
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.config_path(), serde_json::to_string_pretty(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_config_defaults() {
        let temp = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp.path().to_path_buf());

        let config = storage.load();
        assert_eq!(config.selected_model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp.path().to_path_buf());

        let mut config = AppConfig::default();
        config.selected_model = "mistral:7b".to_string();
        config.theme = Theme::Light;
        storage.save(&config).unwrap();

        let loaded = storage.load();
        assert_eq!(loaded.selected_model, "mistral:7b");
        assert_eq!(loaded.theme, Theme::Light);
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp.path().to_path_buf());

        fs::write(temp.path().join("config.json"), "garbage").unwrap();
        let config = storage.load();
        assert_eq!(config.selected_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let storage = ConfigStorage::new(temp.path().to_path_buf());

        fs::write(
            temp.path().join("config.json"),
            r#"{"selectedModel": "phi3"}"#,
        )
        .unwrap();
        let config = storage.load();
        assert_eq!(config.selected_model, "phi3");
        assert_eq!(config.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.font_size, 14);
    }
}
