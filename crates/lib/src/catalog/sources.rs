//! Source-subset detection.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::config::AppConfig;
use crate::consts::TEST_PROFILE_SOURCES;

use super::CatalogError;

/// How a module's source subsets are determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDetection {
  /// Every module gets the same subsets; the filesystem is never touched.
  Fixed(BTreeSet<String>),
  /// Child directories of the module location whose name contains `src`.
  Filesystem,
}

impl SourceDetection {
  pub fn for_config(config: &AppConfig) -> Self {
    if config.is_test_profile() {
      Self::Fixed(TEST_PROFILE_SOURCES.iter().map(|s| s.to_string()).collect())
    } else {
      Self::Filesystem
    }
  }

  pub fn detect(&self, location: &Path) -> Result<BTreeSet<String>, CatalogError> {
    match self {
      Self::Fixed(sources) => Ok(sources.clone()),
      Self::Filesystem => scan_source_dirs(location),
    }
  }
}

fn scan_source_dirs(location: &Path) -> Result<BTreeSet<String>, CatalogError> {
  let to_error = |source| CatalogError::SourceDetection {
    location: location.to_path_buf(),
    source,
  };

  let mut sources = BTreeSet::new();
  for entry in fs::read_dir(location).map_err(to_error)? {
    let entry = entry.map_err(to_error)?;
    if !entry.file_type().map_err(to_error)?.is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.contains("src") {
      sources.insert(name);
    }
  }
  Ok(sources)
}
