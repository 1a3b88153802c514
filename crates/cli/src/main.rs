mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing_subscriber::EnvFilter;

use cmd::cmd_run;
use output::print_error;
use wcbuild_lib::builder::Invocation;

/// wcb - build, test and restart modules of a Windchill codebase
#[derive(Parser)]
#[command(name = "wcb")]
#[command(author, version, about, long_about = None)]
#[command(group(
  ArgGroup::new("work")
    .required(true)
    .multiple(true)
    .args(["build", "test_unit", "test_integration", "custom", "num_key", "restart", "suite"])
))]
struct Cli {
  /// Build modules, as MODULE_CODES (e.g. mpml_sc)
  #[arg(short, long, value_name = "SPEC")]
  build: Vec<String>,

  /// Run unit tests, as MODULE or MODULE_TestName
  #[arg(short = 'u', long, value_name = "SPEC")]
  test_unit: Vec<String>,

  /// Run integration tests, as MODULE or MODULE_TestName
  #[arg(short = 'i', long, value_name = "SPEC")]
  test_integration: Vec<String>,

  /// Run a named custom command from the configuration
  #[arg(short, long, value_name = "NAME")]
  custom: Vec<String>,

  /// Rebuild the numeric keys of a module
  #[arg(short, long, value_name = "SPEC")]
  num_key: Vec<String>,

  /// Restart the server when everything else is done
  #[arg(short, long)]
  restart: bool,

  /// Run a suite declared in the configuration
  #[arg(
    short,
    long,
    value_name = "SUITE",
    conflicts_with_all = ["build", "test_unit", "test_integration", "custom", "num_key", "restart"]
  )]
  suite: Option<String>,

  /// List the commands without running them
  #[arg(short, long)]
  dry: bool,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,

  /// Configuration file (default: $WCB_CONFIG, then ~/.wc_builder/cfg.yml)
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,
}

impl Cli {
  fn invocation(&self) -> Invocation {
    Invocation {
      suite: self.suite.clone(),
      build: self.build.clone(),
      test_unit: self.test_unit.clone(),
      test_integration: self.test_integration.clone(),
      custom: self.custom.clone(),
      num_key: self.num_key.clone(),
      restart: self.restart,
    }
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cmd_run(&cli.invocation(), cli.config.as_deref(), cli.dry) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
