use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".merchant_core";
const HOME_ENV: &str = "MERCHANT_CORE_HOME";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "store.json";

/// Returns the application data directory, defaulting to `~/.merchant_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the configuration file beneath `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Path to the key-value store file beneath `base`.
pub fn store_file_in(base: &Path) -> PathBuf {
    base.join(STORE_FILE)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_under_base() {
        let base = PathBuf::from("/tmp/merchant");
        assert_eq!(
            config_file_in(&base),
            PathBuf::from("/tmp/merchant/config/config.json")
        );
        assert_eq!(store_file_in(&base), PathBuf::from("/tmp/merchant/store.json"));
    }
}
