//! Module catalog.
//!
//! Turns the module registry and the build-order file into an immutable
//! name-to-[`ModuleInfo`] mapping. Construction is a straight pipeline:
//! registry entries are located under the root, ranked from the order file,
//! then given their source subsets. Each stage returns a new value.

pub mod order;
pub mod registry;
pub mod sources;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;

pub use order::BuildOrder;
pub use registry::{RegistryEntry, read_registry};
pub use sources::SourceDetection;

/// Errors that can occur while building the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("module registry {} could not be read: {source}", path.display())]
  RegistryRead { path: PathBuf, source: std::io::Error },

  #[error("module registry {} could not be parsed: {source}", path.display())]
  RegistryParse { path: PathBuf, source: quick_xml::DeError },

  #[error("the build order file {} is not available: {source}", path.display())]
  OrderFileUnavailable { path: PathBuf, source: std::io::Error },

  #[error("could not navigate through module location {}: {source}", location.display())]
  SourceDetection { location: PathBuf, source: std::io::Error },
}

/// One buildable unit of the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleInfo {
  pub name: String,
  /// Absolute location: the configured root joined with the registry location.
  pub location: PathBuf,
  /// Rank from the build-order file; 0 when unlisted.
  pub order: usize,
  /// Source subsets present in the module (e.g. `src`, `src_test`).
  pub sources: BTreeSet<String>,
}

impl ModuleInfo {
  /// Locate a registry entry under `root`. Existence is not checked here.
  pub fn from_entry(entry: &RegistryEntry, root: &Path) -> Self {
    Self {
      name: entry.module_name().to_string(),
      location: root.join(entry.location.trim_start_matches('/')),
      order: 0,
      sources: BTreeSet::new(),
    }
  }

  pub fn with_order(self, order: usize) -> Self {
    Self { order, ..self }
  }

  pub fn with_sources(self, sources: BTreeSet<String>) -> Self {
    Self { sources, ..self }
  }

  /// Location rendered for command templates.
  pub fn location_str(&self) -> String {
    self.location.display().to_string()
  }

  pub fn has_source(&self, subset: &str) -> bool {
    self.sources.contains(subset)
  }
}

/// All known modules, keyed by name. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
  modules: BTreeMap<String, ModuleInfo>,
}

impl Catalog {
  pub fn from_modules(modules: impl IntoIterator<Item = ModuleInfo>) -> Self {
    Self {
      modules: modules.into_iter().map(|m| (m.name.clone(), m)).collect(),
    }
  }

  pub fn get(&self, name: &str) -> Option<&ModuleInfo> {
    self.modules.get(name)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &ModuleInfo> {
    self.modules.values()
  }

  /// Modules sorted by declared build order, ties broken by name.
  pub fn ordered(&self) -> Vec<&ModuleInfo> {
    let mut modules: Vec<&ModuleInfo> = self.modules.values().collect();
    modules.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
    modules
  }
}

/// Build the catalog from a registry file and an order file.
pub fn build_catalog(
  registry_path: &Path,
  order_path: &Path,
  root: &Path,
  detection: &SourceDetection,
) -> Result<Catalog, CatalogError> {
  let order = BuildOrder::read(order_path)?;
  let entries = read_registry(registry_path)?;
  debug!(entries = entries.len(), ranked = order.len(), "inputs read");

  let modules = entries
    .iter()
    .map(|entry| ModuleInfo::from_entry(entry, root))
    .map(|module| {
      let rank = order.rank_of(&module.name);
      module.with_order(rank)
    })
    .map(|module| {
      let sources = detection.detect(&module.location)?;
      Ok(module.with_sources(sources))
    })
    .collect::<Result<Vec<_>, CatalogError>>()?;

  let catalog = Catalog::from_modules(modules);
  info!(modules = catalog.len(), "module catalog built");
  Ok(catalog)
}

/// Build the catalog from the inputs named in the configuration.
pub fn catalog_from_config(config: &AppConfig) -> Result<Catalog, CatalogError> {
  build_catalog(
    config.module_registry(),
    config.build_order(),
    &config.root,
    &SourceDetection::for_config(config),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  const REGISTRY: &str = r#"<ModuleRegistry>
  <Module name="grp/ModuleA" location="a/path/to/ModuleA"/>
  <Module name="grp/ModuleB" location="a/path/to/ModuleB"/>
  <Module name="grp/ModuleC" location="a/path/to/ModuleC"/>
</ModuleRegistry>
"#;

  struct Fixture {
    temp: TempDir,
  }

  impl Fixture {
    fn new(registry: &str, order: &str) -> Self {
      let temp = TempDir::new().unwrap();
      fs::write(temp.path().join("moduleRegistry.xml"), registry).unwrap();
      fs::write(temp.path().join("orderFile.includes"), order).unwrap();
      Self { temp }
    }

    fn registry(&self) -> PathBuf {
      self.temp.path().join("moduleRegistry.xml")
    }

    fn order(&self) -> PathBuf {
      self.temp.path().join("orderFile.includes")
    }
  }

  fn fixed() -> SourceDetection {
    SourceDetection::Fixed(BTreeSet::new())
  }

  #[test]
  fn builds_modules_with_order_and_location() {
    let fixture = Fixture::new(REGISTRY, "grp/ModuleA\ngrp/ModuleB\n");

    let catalog = build_catalog(&fixture.registry(), &fixture.order(), Path::new("/opt"), &fixed()).unwrap();

    assert_eq!(catalog.len(), 3);
    let a = catalog.get("ModuleA").unwrap();
    assert_eq!(a.location, PathBuf::from("/opt/a/path/to/ModuleA"));
    assert_eq!(a.order, 0);
    assert_eq!(catalog.get("ModuleB").unwrap().order, 1);
    assert_eq!(catalog.get("ModuleC").unwrap().order, 0);
  }

  #[test]
  fn ordered_sorts_by_rank_then_name() {
    let fixture = Fixture::new(REGISTRY, "grp/ModuleC\ngrp/ModuleA\ngrp/ModuleB\n");

    let catalog = build_catalog(&fixture.registry(), &fixture.order(), Path::new("/opt"), &fixed()).unwrap();
    let names: Vec<&str> = catalog.ordered().iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["ModuleC", "ModuleA", "ModuleB"]);
  }

  #[test]
  fn test_profile_assigns_fixed_sources() {
    let fixture = Fixture::new(REGISTRY, "");
    let config = AppConfig {
      profile: "test".to_string(),
      ..AppConfig::default()
    };

    let catalog = build_catalog(
      &fixture.registry(),
      &fixture.order(),
      Path::new("/opt"),
      &SourceDetection::for_config(&config),
    )
    .unwrap();

    for module in catalog.iter() {
      assert!(module.has_source("src"));
      assert!(module.has_source("src_test"));
      assert!(module.has_source("src_web"));
    }
  }

  #[test]
  fn filesystem_detection_reads_module_directories() {
    let fixture = Fixture::new(
      r#"<ModuleRegistry><Module name="grp/Real" location="modules/Real"/></ModuleRegistry>"#,
      "grp/Real\n",
    );
    let module_dir = fixture.temp.path().join("modules").join("Real");
    fs::create_dir_all(module_dir.join("src")).unwrap();
    fs::create_dir_all(module_dir.join("docs")).unwrap();

    let catalog = build_catalog(
      &fixture.registry(),
      &fixture.order(),
      fixture.temp.path(),
      &SourceDetection::Filesystem,
    )
    .unwrap();

    let real = catalog.get("Real").unwrap();
    assert_eq!(real.sources.iter().collect::<Vec<_>>(), vec!["src"]);
  }

  #[test]
  fn missing_module_directory_fails_the_whole_catalog() {
    let fixture = Fixture::new(REGISTRY, "");

    let err = build_catalog(
      &fixture.registry(),
      &fixture.order(),
      Path::new("/definitely/not/here"),
      &SourceDetection::Filesystem,
    )
    .unwrap_err();

    assert!(matches!(err, CatalogError::SourceDetection { .. }));
  }

  #[test]
  fn missing_order_file_is_fatal() {
    let fixture = Fixture::new(REGISTRY, "");

    let err = build_catalog(
      &fixture.registry(),
      &fixture.temp.path().join("notExisting.includes"),
      Path::new("/opt"),
      &fixed(),
    )
    .unwrap_err();

    assert!(matches!(err, CatalogError::OrderFileUnavailable { .. }));
  }

  #[test]
  fn unparsable_registry_is_fatal() {
    let fixture = Fixture::new("<ModuleRegistry><Module", "");

    let err = build_catalog(&fixture.registry(), &fixture.order(), Path::new("/opt"), &fixed()).unwrap_err();

    assert!(matches!(err, CatalogError::RegistryParse { .. }));
  }
}
