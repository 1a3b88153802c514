//! CLI output formatting utilities.
//!
//! Status lines for the `wcb` binary and the dry-run listing. Everything goes to
//! stdout so errors stay in line with command headers and the run summary.

use owo_colors::{OwoColorize, Stream};

use wcbuild_lib::execute::report::single_line;
use wcbuild_lib::task::{Command, ExecutionStatus, Task};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  println!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stdout, |s| s.red()),
    message.if_supports_color(Stream::Stdout, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

/// Dry-run line for the `number`th command of a run.
pub fn plan_line(number: usize, command: &Command) -> String {
  let line = format!("  {number:>3}. {}", single_line(command.text()));
  match command.status() {
    ExecutionStatus::Prepared => line,
    status => format!("{line} [{status}]"),
  }
}

/// Numbered listing of every command in `tasks`, grouped by task.
pub fn print_plan(tasks: &[Task]) {
  let mut number = 0;
  for task in tasks {
    println!(
      "{} {}",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
      task.describe().if_supports_color(Stream::Stdout, |s| s.bold())
    );
    for command in &task.commands {
      number += 1;
      println!("{}", plan_line(number, command));
    }
  }
}
