//! Sequential execution of tasks.
//!
//! Commands run one at a time, in task order, through the configured shell.
//! Each command moves Prepared -> Running -> Completed | Failed; a command
//! that is not Prepared when its turn comes (a failed placeholder) is skipped.
//! Under fail-fast the first failed command ends the run.

pub mod report;
pub mod shell;

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::task::{Command, ExecutionStatus, Task};

pub use shell::Shell;

/// Errors that can occur during command execution.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The command ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CommandFailed { cmd: String, code: Option<i32> },

  /// The shell could not be started or waited on.
  #[error("command could not be run: {cmd}: {source}")]
  Spawn { cmd: String, source: std::io::Error },
}

/// Runs task lists with a fixed failure policy.
#[derive(Debug, Clone)]
pub struct Executor {
  fail_fast: bool,
  shell: Shell,
}

impl Executor {
  pub fn new(fail_fast: bool, shell: Shell) -> Self {
    Self { fail_fast, shell }
  }

  pub fn from_config(config: &AppConfig) -> Self {
    Self::new(config.fail_on_error, Shell::from_override(config.shell.as_deref()))
  }

  /// Run every command of every task in order.
  ///
  /// Without fail-fast all commands are attempted and failures only show up
  /// as statuses. With fail-fast the first failure is returned and nothing
  /// after it runs.
  pub async fn run(&self, tasks: &mut [Task]) -> Result<(), ExecuteError> {
    info!(tasks = tasks.len(), fail_fast = self.fail_fast, "starting run");
    for task in tasks.iter_mut() {
      debug!(task = %task.describe(), commands = task.commands.len(), "running task");
      for command in task.commands.iter_mut() {
        self.run_command(command).await?;
      }
    }
    Ok(())
  }

  /// Run one command if it is still Prepared.
  pub async fn run_command(&self, command: &mut Command) -> Result<(), ExecuteError> {
    if !command.start() {
      debug!(cmd = command.text(), status = %command.status(), "not prepared; skipping");
      return Ok(());
    }

    print!("{}", report::header(command.text()));
    let started = Instant::now();
    let outcome = self.shell.run(command.text()).await;
    let elapsed = started.elapsed();

    let failure = match outcome {
      Ok(status) if status.success() => {
        command.finish(true, elapsed);
        println!("{}", report::completed_notice(command.text()));
        return Ok(());
      }
      Ok(status) => {
        command.finish(false, elapsed);
        println!("{}", report::failed_notice(command.text(), &status));
        ExecuteError::CommandFailed {
          cmd: command.text().to_string(),
          code: status.code(),
        }
      }
      Err(source) => {
        command.finish(false, elapsed);
        println!("{}", report::failed_notice(command.text(), &source));
        ExecuteError::Spawn {
          cmd: command.text().to_string(),
          source,
        }
      }
    };

    debug_assert_eq!(command.status(), ExecutionStatus::Failed);
    if self.fail_fast {
      error!(error = %failure, "aborting run");
      return Err(failure);
    }
    Ok(())
  }

  /// Print the run summary for `tasks`.
  pub fn print_summary(&self, tasks: &[Task]) {
    print!("{}", report::summary(tasks));
  }
}

impl Default for Executor {
  fn default() -> Self {
    Self::new(false, Shell::default())
  }
}
