//! Tasks and commands produced by the task builder and consumed by the executor.

use std::fmt;
use std::time::Duration;

use owo_colors::AnsiColors;

use crate::catalog::ModuleInfo;

/// Kind of orchestrated work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
  Build,
  TestUnit,
  TestIntegration,
  Suite,
  Restart,
  Custom,
  NumKey,
}

impl Target {
  pub fn as_str(&self) -> &'static str {
    match self {
      Target::Build => "build",
      Target::TestUnit => "test_unit",
      Target::TestIntegration => "test_integration",
      Target::Suite => "suite",
      Target::Restart => "restart",
      Target::Custom => "custom",
      Target::NumKey => "num_key",
    }
  }

  /// Ant target name: underscores become dots (`test_unit` -> `test.unit`).
  pub fn ant_target(&self) -> String {
    self.as_str().replace('_', ".")
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Lifecycle of a [`Command`]: Prepared -> Running -> Completed | Failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
  #[default]
  Prepared,
  Running,
  Completed,
  Failed,
}

impl ExecutionStatus {
  pub fn label(&self) -> &'static str {
    match self {
      ExecutionStatus::Prepared => "PREPARED",
      ExecutionStatus::Running => "RUNNING",
      ExecutionStatus::Completed => "COMPLETED",
      ExecutionStatus::Failed => "FAILED",
    }
  }

  /// Color used when reporting the status.
  pub fn color(&self) -> AnsiColors {
    match self {
      ExecutionStatus::Prepared | ExecutionStatus::Running => AnsiColors::Yellow,
      ExecutionStatus::Completed => AnsiColors::Green,
      ExecutionStatus::Failed => AnsiColors::Red,
    }
  }
}

impl fmt::Display for ExecutionStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// One shell invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
  text: String,
  status: ExecutionStatus,
  duration: Duration,
}

impl Command {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      status: ExecutionStatus::Prepared,
      duration: Duration::ZERO,
    }
  }

  /// A placeholder that is already failed and will never be executed.
  pub fn failed_placeholder(text: impl Into<String>) -> Self {
    Self {
      status: ExecutionStatus::Failed,
      ..Self::new(text)
    }
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn status(&self) -> ExecutionStatus {
    self.status
  }

  pub fn duration(&self) -> Duration {
    self.duration
  }

  /// Prepared -> Running. Returns false, leaving the command untouched, from any other status.
  pub(crate) fn start(&mut self) -> bool {
    if self.status != ExecutionStatus::Prepared {
      return false;
    }
    self.status = ExecutionStatus::Running;
    true
  }

  /// Running -> Completed | Failed, recording how long the process ran.
  pub(crate) fn finish(&mut self, succeeded: bool, duration: Duration) {
    debug_assert_eq!(self.status, ExecutionStatus::Running);
    self.status = if succeeded {
      ExecutionStatus::Completed
    } else {
      ExecutionStatus::Failed
    };
    self.duration = duration;
  }
}

/// The module a task belongs to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskModule {
  WithModule(ModuleInfo),
  ModuleAgnostic,
}

impl TaskModule {
  pub fn name(&self) -> Option<&str> {
    match self {
      TaskModule::WithModule(module) => Some(&module.name),
      TaskModule::ModuleAgnostic => None,
    }
  }
}

/// One unit of orchestrated work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
  pub target: Target,
  pub module: TaskModule,
  pub commands: Vec<Command>,
}

impl Task {
  pub fn for_module(target: Target, module: &ModuleInfo, commands: Vec<Command>) -> Self {
    Self {
      target,
      module: TaskModule::WithModule(module.clone()),
      commands,
    }
  }

  pub fn module_agnostic(target: Target, command: Command) -> Self {
    Self {
      target,
      module: TaskModule::ModuleAgnostic,
      commands: vec![command],
    }
  }

  /// Short description used in dry runs and logs, e.g. `build MPMLink`.
  pub fn describe(&self) -> String {
    match self.module.name() {
      Some(name) => format!("{} {}", self.target, name),
      None => self.target.to_string(),
    }
  }
}
