//! Module identifier and spec resolution.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, ModuleInfo};
use crate::spec::{SpecCodes, SpecError, TargetSpec};

#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("Module alias {id} not found.")]
  ModuleNotFound { id: String },

  #[error("invalid build spec \"{spec}\": {source}")]
  UnknownSpecCode { spec: String, source: SpecError },

  #[error("build spec \"{spec}\" names no source subset to build")]
  NoSubsetRequested { spec: String },
}

/// Resolves operator tokens against the alias table and the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
  catalog: &'a Catalog,
  aliases: &'a HashMap<String, String>,
}

impl<'a> Resolver<'a> {
  pub fn new(catalog: &'a Catalog, aliases: &'a HashMap<String, String>) -> Self {
    Self { catalog, aliases }
  }

  /// Resolve an alias or a direct module name.
  ///
  /// An alias takes precedence over a module of the same name. An alias
  /// pointing at a module the catalog does not know is not found either.
  pub fn resolve_module_id(&self, id: &str) -> Result<&'a ModuleInfo, ResolveError> {
    let name = self.aliases.get(id).map_or(id, String::as_str);
    let module = self.catalog.get(name).ok_or_else(|| ResolveError::ModuleNotFound { id: id.to_string() })?;
    debug!(id, module = %module.name, "module resolved");
    Ok(module)
  }

  /// Resolve a `<module>_<qualifier>` token. The qualifier is returned untouched.
  pub fn resolve<'t>(&self, token: &'t str) -> Result<(&'a ModuleInfo, &'t str), ResolveError> {
    let spec = TargetSpec::split(token);
    let module = self.resolve_module_id(spec.module_id)?;
    Ok((module, spec.qualifier))
  }

  /// Resolve a build token, tokenizing its codes.
  pub fn resolve_build(&self, token: &str) -> Result<(&'a ModuleInfo, SpecCodes), ResolveError> {
    let (module, codes) = self.resolve(token)?;
    Ok((module, parse_codes(token, codes)?))
  }

  /// Resolve a module identifier with codes supplied separately, as suites declare them.
  pub fn resolve_with_codes(&self, id: &str, codes: &str) -> Result<(&'a ModuleInfo, SpecCodes), ResolveError> {
    let module = self.resolve_module_id(id)?;
    Ok((module, parse_codes(&format!("{}_{}", id, codes), codes)?))
  }
}

/// Tokenize build codes. At least one subset is required so every build task has a command.
fn parse_codes(spec: &str, codes: &str) -> Result<SpecCodes, ResolveError> {
  let parsed = SpecCodes::parse(codes).map_err(|source| ResolveError::UnknownSpecCode {
    spec: spec.to_string(),
    source,
  })?;
  if parsed.is_empty() {
    return Err(ResolveError::NoSubsetRequested { spec: spec.to_string() });
  }
  Ok(parsed)
}
