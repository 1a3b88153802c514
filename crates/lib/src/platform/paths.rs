use std::path::PathBuf;

use crate::consts::{APP_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILENAME};

/// Returns the user's home directory, or `None` when the environment does not say.
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory, or `None` when the environment does not say.
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Returns the per-user configuration directory (`~/.wc_builder`).
pub fn config_dir() -> Option<PathBuf> {
  home_dir().map(|home| home.join(APP_DIR_NAME))
}

/// Returns the configuration file explicitly requested through `WCB_CONFIG`, if any.
pub fn config_override() -> Option<PathBuf> {
  std::env::var_os(CONFIG_ENV_VAR)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
}

/// Returns the default configuration file path (`~/.wc_builder/cfg.yml`).
pub fn default_config_file() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
