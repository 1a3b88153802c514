//! Test utilities for wcbuild-lib.
//!
//! Command strings for the platform default shell, so executor tests behave
//! the same under `/bin/sh -c` and `cmd.exe /C`.

use std::path::Path;

/// A command string that exits with status 0.
#[cfg(unix)]
pub fn succeeding_command() -> &'static str {
  "exit 0"
}

#[cfg(windows)]
pub fn succeeding_command() -> &'static str {
  "exit /b 0"
}

/// A command string that exits with status 1.
#[cfg(unix)]
pub fn failing_command() -> &'static str {
  "exit 1"
}

#[cfg(windows)]
pub fn failing_command() -> &'static str {
  "exit /b 1"
}

/// A command string that creates an empty marker file at `path`.
#[cfg(unix)]
pub fn touch_file(path: &Path) -> String {
  format!("touch '{}'", path.display())
}

#[cfg(windows)]
pub fn touch_file(path: &Path) -> String {
  format!("type nul > \"{}\"", path.display())
}
