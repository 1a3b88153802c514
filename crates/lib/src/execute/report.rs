//! Console rendering for command execution: headers, notices and the run summary.

use std::fmt::Display;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

use crate::consts::{COMMAND_WIDTH, HEADER_FILLER, SUMMARY_FILLER};
use crate::task::{Command, ExecutionStatus, Task};

/// Precision of durations shown in the summary.
pub const SUMMARY_PRECISION: Duration = Duration::from_millis(10);

/// Filler placed on each side of a centered message of `message_len` characters.
pub fn filler(message_len: usize) -> String {
  let width = COMMAND_WIDTH.saturating_sub(message_len + 2) / 2;
  HEADER_FILLER.to_string().repeat(width)
}

/// Command text on a single line, newlines shown as `\n`.
pub fn single_line(text: &str) -> String {
  text.replace('\n', "\\n")
}

/// Three-line boxed header announcing `text`.
pub fn header(text: &str) -> String {
  let rule = HEADER_FILLER.to_string().repeat(COMMAND_WIDTH);
  let message = format!("Executing command {}", single_line(text));
  let fill = filler(message.chars().count());
  format!("{rule}\n{fill} {message} {fill}\n{rule}\n")
}

pub fn completed_notice(text: &str) -> String {
  format!("Command {} completed successfully.", single_line(text))
}

pub fn failed_notice(text: &str, detail: &dyn Display) -> String {
  format!("Command {} failed: {}.", single_line(text), detail)
}

/// Round `duration` to the nearest multiple of `precision`, halves rounding up.
pub fn round_duration(duration: Duration, precision: Duration) -> Duration {
  let step = precision.as_nanos();
  if step == 0 {
    return duration;
  }
  let nanos = duration.as_nanos();
  let down = nanos - nanos % step;
  let rounded = if (nanos % step) * 2 >= step { down + step } else { down };
  Duration::from_nanos(u64::try_from(rounded).unwrap_or(u64::MAX))
}

fn status_label(status: ExecutionStatus) -> String {
  let padded = format!("{:<9}", status.label());
  padded
    .if_supports_color(Stream::Stdout, |s| s.color(status.color()))
    .to_string()
}

fn summary_line(command: &Command) -> String {
  let duration = humantime::format_duration(round_duration(command.duration(), SUMMARY_PRECISION));
  format!(
    "{} {:>12} {}",
    status_label(command.status()),
    duration.to_string(),
    single_line(command.text())
  )
}

/// Summary of the run, one line per command that ran or was marked failed.
///
/// Commands still Prepared (never reached after a fail-fast abort) are left out.
pub fn summary(tasks: &[Task]) -> String {
  let rows = tasks
    .iter()
    .flat_map(|task| task.commands.iter())
    .filter(|command| command.status() != ExecutionStatus::Prepared)
    .map(summary_line);

  [SUMMARY_FILLER.to_string().repeat(COMMAND_WIDTH), "Build run finished".to_string()]
    .into_iter()
    .chain(rows)
    .map(|line| line + "\n")
    .collect()
}
