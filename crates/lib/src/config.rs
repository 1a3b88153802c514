//! Application configuration.
//!
//! The configuration is a YAML document, by default at `~/.wc_builder/cfg.yml`.
//! When the default file is missing it is created from [`DEFAULT_CONFIG`]
//! before being read, so a first run always has something to work with.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::consts::{DEFAULT_CONFIG, TEST_PROFILE};
use crate::platform::paths::{config_override, default_config_file};

/// Errors that can occur while locating or reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("user home directory is not available")]
  HomeDirUnavailable,

  #[error("could not create configuration directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("could not write configuration file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("could not read configuration file {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("in file {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_yaml::Error },
}

/// Commands shipped with the product rather than defined by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OotbCommands {
  pub restart: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Commands {
  pub ootb: OotbCommands,
  /// Operator-defined commands, addressed by name with `-c`.
  pub custom: HashMap<String, String>,
}

/// Locations of the build inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Input {
  pub build_order: PathBuf,
  pub module_registry: PathBuf,
}

/// A named, pre-declared bundle of work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Suite {
  pub restart: bool,
  /// Module identifier (alias or name) to build spec codes, e.g. `MPMLink: cst`.
  pub build: BTreeMap<String, String>,
  pub custom: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  pub profile: String,
  pub root: PathBuf,
  /// Fail-fast: the first failed command aborts the run.
  pub fail_on_error: bool,
  /// Shell used to run commands; platform default when unset.
  pub shell: Option<String>,
  pub commands: Commands,
  pub input: Input,
  /// Short alias to canonical module name.
  pub aliases: HashMap<String, String>,
  pub suites: HashMap<String, Suite>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      profile: "prod".to_string(),
      root: PathBuf::new(),
      fail_on_error: false,
      shell: None,
      commands: Commands::default(),
      input: Input::default(),
      aliases: HashMap::new(),
      suites: HashMap::new(),
    }
  }
}

impl AppConfig {
  /// Parse a configuration document. `origin` is only used for error messages.
  pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
    serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
      path: origin.to_path_buf(),
      source,
    })
  }

  /// Read and parse the configuration at `path`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_yaml(&content, path)?;
    debug!(path = %path.display(), profile = %config.profile, "configuration loaded");
    Ok(config)
  }

  /// Resolve the configuration file and load it.
  ///
  /// An explicit path wins over `WCB_CONFIG`, which wins over the default
  /// location. Only the default location is created when missing; an explicitly
  /// named file that does not exist is a read error.
  pub fn locate_and_load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(config_override) {
      return Self::load(&path);
    }
    let path = default_config_file().ok_or(ConfigError::HomeDirUnavailable)?;
    if !path.exists() {
      write_default_config(&path)?;
    }
    Self::load(&path)
  }

  pub fn is_test_profile(&self) -> bool {
    self.profile == TEST_PROFILE
  }

  pub fn module_registry(&self) -> &Path {
    &self.input.module_registry
  }

  pub fn build_order(&self) -> &Path {
    &self.input.build_order
  }
}

/// Write [`DEFAULT_CONFIG`] to `path`, creating its parent directory.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
  if let Some(dir) = path.parent() {
    fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
      path: dir.to_path_buf(),
      source,
    })?;
  }
  fs::write(path, DEFAULT_CONFIG).map_err(|source| ConfigError::WriteFile {
    path: path.to_path_buf(),
    source,
  })?;
  info!(path = %path.display(), "created default configuration");
  Ok(())
}
