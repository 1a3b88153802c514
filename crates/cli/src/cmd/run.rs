//! Implementation of a `wcb` run.
//!
//! Loads the configuration, builds the module catalog, turns the invocation
//! into tasks and either lists them (dry run) or executes them in order.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use wcbuild_lib::builder::{Invocation, TaskBuilder};
use wcbuild_lib::catalog::catalog_from_config;
use wcbuild_lib::config::AppConfig;
use wcbuild_lib::execute::Executor;

use crate::output::{print_info, print_plan, print_success};

pub fn cmd_run(invocation: &Invocation, config: Option<&Path>, dry: bool) -> Result<()> {
  let config = AppConfig::locate_and_load(config).context("Failed to load configuration")?;
  let catalog = catalog_from_config(&config).context("Failed to build module catalog")?;
  info!(modules = catalog.len(), profile = %config.profile, "catalog ready");

  let mut tasks = TaskBuilder::new(&config, &catalog).build_tasks(invocation)?;

  if dry {
    print_plan(&tasks);
    let commands: usize = tasks.iter().map(|t| t.commands.len()).sum();
    print_info(&format!("Dry run: {} task(s), {} command(s)", tasks.len(), commands));
    return Ok(());
  }

  let executor = Executor::from_config(&config);
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt.block_on(executor.run(&mut tasks));
  executor.print_summary(&tasks);
  result?;

  print_success("Done");
  Ok(())
}
