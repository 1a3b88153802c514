//! Shell used to run command strings.

use std::process::ExitStatus;

use tokio::process::Command;
use tracing::debug;

/// A shell program plus the arguments that make it run a single command string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
  program: String,
  args: Vec<String>,
}

impl Shell {
  /// `/bin/sh -c` on Unix, `cmd.exe /C` on Windows.
  pub fn platform_default() -> Self {
    #[cfg(unix)]
    {
      Self {
        program: "/bin/sh".to_string(),
        args: vec!["-c".to_string()],
      }
    }

    #[cfg(windows)]
    {
      Self {
        program: "cmd.exe".to_string(),
        args: vec!["/C".to_string()],
      }
    }
  }

  /// Use `shell`, choosing the command-string argument from its name.
  pub fn named(shell: &str) -> Self {
    let args = if shell.contains("powershell") || shell.contains("pwsh") {
      vec!["-NoProfile".to_string(), "-Command".to_string()]
    } else if shell.contains("cmd") {
      vec!["/C".to_string()]
    } else {
      // Unix-style shell (bash, sh, zsh, ...)
      vec!["-c".to_string()]
    };
    Self {
      program: shell.to_string(),
      args,
    }
  }

  /// The configured override, or the platform default.
  pub fn from_override(shell: Option<&str>) -> Self {
    match shell {
      Some(shell) if !shell.trim().is_empty() => Self::named(shell.trim()),
      _ => Self::platform_default(),
    }
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn args(&self) -> &[String] {
    &self.args
  }

  /// Run `cmd` to completion with inherited stdio and return its exit status.
  ///
  /// There is no timeout: a command that never exits blocks the caller.
  pub async fn run(&self, cmd: &str) -> std::io::Result<ExitStatus> {
    debug!(shell = %self.program, cmd, "spawning process");
    Command::new(&self.program).args(&self.args).arg(cmd).status().await
  }
}

impl Default for Shell {
  fn default() -> Self {
    Self::platform_default()
  }
}
