//! Translation of an invocation into an ordered list of [`Task`]s.
//!
//! Two mutually exclusive modes exist. Suite mode expands a configured suite;
//! explicit mode processes the operator's lists in a fixed order: builds,
//! unit tests, integration tests, custom commands, numeric-key builds and
//! finally the restart.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, ModuleInfo};
use crate::config::AppConfig;
use crate::consts;
use crate::resolve::{ResolveError, Resolver};
use crate::spec::{SpecCodes, Subset};
use crate::task::{Command, Target, Task};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error("suite {name} not found in configuration")]
  SuiteNotFound { name: String },

  #[error("command {name} not found in custom commands")]
  CustomCommandNotFound { name: String },
}

/// What the operator asked for, already parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
  /// Named suite; when set every other field is ignored.
  pub suite: Option<String>,
  pub build: Vec<String>,
  pub test_unit: Vec<String>,
  pub test_integration: Vec<String>,
  pub custom: Vec<String>,
  pub num_key: Vec<String>,
  pub restart: bool,
}

impl Invocation {
  /// True when the invocation requests no work at all.
  pub fn is_empty(&self) -> bool {
    self.suite.is_none()
      && self.build.is_empty()
      && self.test_unit.is_empty()
      && self.test_integration.is_empty()
      && self.custom.is_empty()
      && self.num_key.is_empty()
      && !self.restart
  }
}

pub struct TaskBuilder<'a> {
  config: &'a AppConfig,
  resolver: Resolver<'a>,
}

impl<'a> TaskBuilder<'a> {
  pub fn new(config: &'a AppConfig, catalog: &'a Catalog) -> Self {
    Self {
      config,
      resolver: Resolver::new(catalog, &config.aliases),
    }
  }

  pub fn build_tasks(&self, invocation: &Invocation) -> Result<Vec<Task>, BuildError> {
    let tasks = match &invocation.suite {
      Some(name) => self.suite_tasks(name)?,
      None => self.explicit_tasks(invocation)?,
    };
    info!(
      tasks = tasks.len(),
      commands = tasks.iter().map(|t| t.commands.len()).sum::<usize>(),
      "tasks built"
    );
    Ok(tasks)
  }

  fn suite_tasks(&self, name: &str) -> Result<Vec<Task>, BuildError> {
    let suite = self
      .config
      .suites
      .get(name)
      .ok_or_else(|| BuildError::SuiteNotFound { name: name.to_string() })?;
    debug!(suite = name, builds = suite.build.len(), "expanding suite");

    let mut builds = suite
      .build
      .iter()
      .map(|(id, codes)| self.resolver.resolve_with_codes(id, codes))
      .collect::<Result<Vec<_>, _>>()?;
    builds.sort_by(|(a, _), (b, _)| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));

    let mut tasks: Vec<Task> = builds
      .into_iter()
      .map(|(module, codes)| Task::for_module(Target::Suite, module, build_commands(module, &codes)))
      .collect();
    for custom in &suite.custom {
      tasks.push(self.custom_task(custom)?);
    }
    if suite.restart {
      tasks.push(self.restart_task());
    }
    Ok(tasks)
  }

  fn explicit_tasks(&self, invocation: &Invocation) -> Result<Vec<Task>, BuildError> {
    let mut tasks = Vec::new();

    for spec in &invocation.build {
      let (module, codes) = self.resolver.resolve_build(spec)?;
      tasks.push(Task::for_module(Target::Build, module, build_commands(module, &codes)));
    }
    for spec in &invocation.test_unit {
      tasks.push(self.test_task(Target::TestUnit, spec)?);
    }
    for spec in &invocation.test_integration {
      tasks.push(self.test_task(Target::TestIntegration, spec)?);
    }
    for name in &invocation.custom {
      tasks.push(self.custom_task(name)?);
    }
    for spec in &invocation.num_key {
      let (module, _) = self.resolver.resolve(spec)?;
      tasks.push(Task::for_module(Target::NumKey, module, vec![num_key_command(module)]));
    }
    if invocation.restart {
      tasks.push(self.restart_task());
    }
    Ok(tasks)
  }

  fn test_task(&self, target: Target, spec: &str) -> Result<Task, BuildError> {
    let (module, test_name) = self.resolver.resolve(spec)?;
    Ok(Task::for_module(target, module, vec![test_command(target, module, test_name)]))
  }

  /// Resolve a custom command by name.
  ///
  /// An unknown name is fatal under fail-fast. Otherwise it becomes an
  /// already-failed placeholder so the run reports it without executing it.
  fn custom_task(&self, name: &str) -> Result<Task, BuildError> {
    let command = match self.config.commands.custom.get(name) {
      Some(text) if !text.is_empty() => Command::new(text.as_str()),
      _ if self.config.fail_on_error => {
        return Err(BuildError::CustomCommandNotFound { name: name.to_string() });
      }
      _ => {
        warn!(name, "custom command not found; marking it failed");
        Command::failed_placeholder(name)
      }
    };
    Ok(Task::module_agnostic(Target::Custom, command))
  }

  fn restart_task(&self) -> Task {
    Task::module_agnostic(Target::Restart, Command::new(self.config.commands.ootb.restart.as_str()))
  }
}

/// Build commands for the requested subsets of `module`.
///
/// Subsets are visited in enumeration order. A clobber-capable subset is
/// clobbered first when the clobber modifier is present.
pub fn build_commands(module: &ModuleInfo, codes: &SpecCodes) -> Vec<Command> {
  if codes.clobber_is_inert() {
    warn!(module = %module.name, "clobber requested but no requested subset can be clobbered");
  }

  let location = module.location_str();
  let mut commands = Vec::new();
  for subset in codes.subsets() {
    if !module.sources.is_empty() && !module.has_source(subset.dir_name()) {
      warn!(module = %module.name, subset = %subset, "module has no such source subset");
    }
    if subset.is_clobber_capable() && codes.clobber() {
      commands.push(Command::new(consts::clobber_command(&location, subset.dir_name())));
    }
    commands.push(Command::new(consts::build_command(&location, subset.dir_name())));
  }
  commands
}

/// Test command for `module`, restricted to `test_name` when one is given.
pub fn test_command(target: Target, module: &ModuleInfo, test_name: &str) -> Command {
  let mut text = consts::test_command(&target.ant_target(), &module.location_str(), Subset::Test.dir_name());
  if !test_name.is_empty() {
    text.push_str(&consts::specific_test_suffix(test_name));
  }
  Command::new(text)
}

pub fn num_key_command(module: &ModuleInfo) -> Command {
  Command::new(consts::num_key_command(&module.location_str(), Subset::Primary.dir_name()))
}
