//! CLI smoke tests for wcb.
//!
//! Every test runs against its own temp configuration (test profile, so no
//! module directories are needed) and only executes harmless echo commands.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ModuleRegistry>
  <Module name="wnc/MPMLink" location="mpml/MPMLink"/>
  <Module name="wnc/MPMLinkCommon" location="mpml/MPMLinkCommon"/>
</ModuleRegistry>
"#;

const ORDER: &str = "wnc/MPMLinkCommon\n#wnc/Disabled\nwnc/MPMLink\n";

/// Get a Command for the wcb binary.
fn wcb_cmd() -> Command {
  cargo_bin_cmd!("wcb")
}

fn quoted(path: &Path) -> String {
  format!("{:?}", path.display().to_string())
}

/// A temp directory holding a registry, an order file and `cfg.yml`.
struct Workspace {
  temp: TempDir,
  config: PathBuf,
}

impl Workspace {
  fn new(fail_on_error: bool) -> Self {
    let temp = TempDir::new().unwrap();
    let registry = temp.path().join("moduleRegistry.xml");
    let order = temp.path().join("build_order.txt");
    fs::write(&registry, REGISTRY).unwrap();
    fs::write(&order, ORDER).unwrap();

    let config = temp.path().join("cfg.yml");
    let content = format!(
      r#"profile: test
root: {root}
fail_on_error: {fail_on_error}
commands:
  ootb:
    restart: echo restarting
  custom:
    hello: echo hello from custom
    broken: exit 3
input:
  build_order: {order}
  module_registry: {registry}
aliases:
  mpml: MPMLink
  mpmlc: MPMLinkCommon
suites:
  current:
    restart: true
    build:
      MPMLink: sc
      mpmlc: w
    custom:
      - hello
"#,
      root = quoted(&temp.path().join("wt")),
      order = quoted(&order),
      registry = quoted(&registry),
    );
    fs::write(&config, content).unwrap();
    Self { temp, config }
  }

  fn cmd(&self) -> Command {
    let mut cmd = wcb_cmd();
    cmd.arg("--config").arg(&self.config);
    cmd
  }
}

// =============================================================================
// Help & argument validation
// =============================================================================

#[test]
fn help_flag_works() {
  wcb_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"))
    .stdout(predicate::str::contains("--suite"));
}

#[test]
fn no_work_is_a_usage_error() {
  let ws = Workspace::new(false);
  ws.cmd().assert().failure().code(2);
}

#[test]
fn suite_conflicts_with_explicit_flags() {
  let ws = Workspace::new(false);
  ws.cmd()
    .args(["-s", "current", "-b", "mpml_s"])
    .assert()
    .failure()
    .code(2)
    .stderr(predicate::str::contains("cannot be used with"));
}

// =============================================================================
// Dry run
// =============================================================================

#[test]
fn dry_run_lists_commands_in_order() {
  let ws = Workspace::new(false);
  let location = ws.temp.path().join("wt").join("mpml/MPMLink").display().to_string();

  ws.cmd()
    .args(["-d", "-b", "mpml_sc", "-u", "mpml_PartTest", "-r"])
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("1. ant clobber -f {location}/src/build.xml")))
    .stdout(predicate::str::contains(format!("2. ant -f {location}/src/build.xml")))
    .stdout(predicate::str::contains(format!(
      "3. ant test.unit -f {location}/src_test/build.xml -Dtest.includes=**/PartTest"
    )))
    .stdout(predicate::str::contains("4. echo restarting"))
    .stdout(predicate::str::contains("Executing command").not());
}

#[test]
fn dry_run_of_suite_orders_builds_by_module_order() {
  let ws = Workspace::new(false);

  let output = ws.cmd().args(["-d", "-s", "current"]).output().unwrap();
  assert!(output.status.success());
  let stdout = String::from_utf8(output.stdout).unwrap();

  let common = stdout.find("suite MPMLinkCommon").unwrap();
  let link = stdout.find("suite MPMLink\n").unwrap();
  let custom = stdout.find("echo hello from custom").unwrap();
  let restart = stdout.find("echo restarting").unwrap();
  assert!(common < link);
  assert!(link < custom);
  assert!(custom < restart);
}

#[test]
fn unknown_suite_fails() {
  let ws = Workspace::new(false);
  ws.cmd()
    .args(["-d", "-s", "nightly"])
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("suite nightly not found"));
}

// =============================================================================
// Runs
// =============================================================================

#[test]
fn successful_run_prints_headers_and_summary() {
  let ws = Workspace::new(true);
  ws.cmd()
    .args(["-c", "hello", "-r"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Executing command echo hello from custom"))
    .stdout(predicate::str::contains("hello from custom"))
    .stdout(predicate::str::contains("Command echo restarting completed successfully."))
    .stdout(predicate::str::contains("Build run finished"))
    .stdout(predicate::str::contains("COMPLETED"));
}

#[test]
fn unknown_module_fails_before_running_anything() {
  let ws = Workspace::new(false);
  ws.cmd()
    .args(["-c", "hello", "-b", "nope_s"])
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("Module alias nope not found."))
    .stdout(predicate::str::contains("Executing command").not());
}

#[test]
fn invalid_spec_code_fails() {
  let ws = Workspace::new(false);
  ws.cmd()
    .args(["-d", "-b", "mpml_sx"])
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("unknown spec code 'x'"));
}

#[test]
fn build_spec_without_subset_fails() {
  let ws = Workspace::new(false);
  for spec in ["mpml", "mpml_c"] {
    ws.cmd()
      .args(["-c", "hello", "-b", spec])
      .assert()
      .failure()
      .code(1)
      .stdout(predicate::str::contains(format!("build spec \"{spec}\" names no source subset")))
      .stdout(predicate::str::contains("Executing command").not());
  }
}

#[test]
fn fail_fast_stops_at_first_failed_command() {
  let ws = Workspace::new(true);
  ws.cmd()
    .args(["-c", "broken", "-r"])
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("Command exit 3 failed"))
    .stdout(predicate::str::contains("Build run finished"))
    .stdout(predicate::str::contains("PREPARED").not())
    .stdout(predicate::str::contains("echo restarting").not());
}

#[test]
fn failures_without_fail_fast_do_not_stop_the_run() {
  let ws = Workspace::new(false);
  ws.cmd()
    .args(["-c", "broken", "-c", "missing", "-r"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Command echo restarting completed successfully."))
    .stdout(predicate::str::contains("FAILED"))
    .stdout(predicate::str::contains("Executing command missing").not());
}

#[test]
fn missing_custom_command_fails_under_fail_fast() {
  let ws = Workspace::new(true);
  ws.cmd()
    .args(["-c", "missing"])
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("command missing not found in custom commands"));
}

// =============================================================================
// Configuration lookup
// =============================================================================

#[test]
fn config_is_read_from_environment_variable() {
  let ws = Workspace::new(false);
  wcb_cmd()
    .env("WCB_CONFIG", &ws.config)
    .args(["-d", "-r"])
    .assert()
    .success()
    .stdout(predicate::str::contains("echo restarting"));
}

#[test]
fn missing_explicit_config_is_an_error() {
  let temp = TempDir::new().unwrap();
  wcb_cmd()
    .arg("--config")
    .arg(temp.path().join("absent.yml"))
    .args(["-d", "-r"])
    .assert()
    .failure()
    .code(1)
    .stdout(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn default_config_is_created_on_first_run() {
  let home = TempDir::new().unwrap();
  wcb_cmd()
    .env("HOME", home.path())
    .env("USERPROFILE", home.path())
    .env_remove("WCB_CONFIG")
    .args(["-d", "-r"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("Failed to build module catalog"));

  let created = home.path().join(".wc_builder").join("cfg.yml");
  let content = fs::read_to_string(created).unwrap();
  assert!(content.contains("profile: prod"));
}
