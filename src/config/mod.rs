use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{MerchantError, Result},
    utils::paths::{app_data_dir, config_file_in, ensure_dir},
};

/// User-adjustable preferences for the terminal front end and store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// ISO 4217 code used when the shell formats amounts.
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Populate an empty ledger with demo transactions on open.
    #[serde(default = "Config::default_seed_sample_data")]
    pub seed_sample_data: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Optional override for where `store.json` lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            seed_sample_data: Self::default_seed_sample_data(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_seed_sample_data() -> bool {
        true
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(app_data_dir)
    }
}

/// Reads [`Config`] from its JSON file, falling back to defaults.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Config stored under `<base>/config/config.json`.
    pub fn with_base_dir(base: &Path) -> Result<Self> {
        let path = config_file_in(base);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self::new(path))
    }

    /// Config stored under the application data directory.
    pub fn from_env() -> Result<Self> {
        Self::with_base_dir(&app_data_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            MerchantError::Config(format!("{}: {}", self.path.display(), err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        fs::write(manager.path(), r#"{"currency":"MYR"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "MYR");
        assert!(config.seed_sample_data);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn invalid_file_reports_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        fs::write(manager.path(), "[]").unwrap();
        assert!(matches!(manager.load(), Err(MerchantError::Config(_))));
    }

    #[test]
    fn currency_defaults_to_usd_when_omitted() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        fs::write(manager.path(), r#"{"ui_color_enabled":false}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "USD");
        assert!(!config.ui_color_enabled);
    }
}
