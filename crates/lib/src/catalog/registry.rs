//! Module registry parsing.
//!
//! The registry is an XML document listing every module of the product:
//!
//! ```xml
//! <ModuleRegistry>
//!   <Module name="wnc/MPMLink" location="mpml/MPMLink"/>
//! </ModuleRegistry>
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::CatalogError;

/// One `<Module>` element of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryEntry {
  /// Compound `group/module` name.
  #[serde(rename = "@name")]
  pub name: String,
  /// Path relative to the configured root.
  #[serde(rename = "@location")]
  pub location: String,
}

impl RegistryEntry {
  /// The module name: everything after the first `/` of the compound name.
  pub fn module_name(&self) -> &str {
    self.name.split_once('/').map_or(self.name.as_str(), |(_, name)| name)
  }
}

#[derive(Debug, Deserialize)]
struct Registry {
  #[serde(rename = "Module", default)]
  modules: Vec<RegistryEntry>,
}

pub fn parse_registry(content: &str) -> Result<Vec<RegistryEntry>, quick_xml::DeError> {
  let registry: Registry = quick_xml::de::from_str(content)?;
  Ok(registry.modules)
}

/// Read and parse the registry at `path`. No partial result is ever returned.
pub fn read_registry(path: &Path) -> Result<Vec<RegistryEntry>, CatalogError> {
  let content = fs::read_to_string(path).map_err(|source| CatalogError::RegistryRead {
    path: path.to_path_buf(),
    source,
  })?;
  parse_registry(&content).map_err(|source| CatalogError::RegistryParse {
    path: path.to_path_buf(),
    source,
  })
}
