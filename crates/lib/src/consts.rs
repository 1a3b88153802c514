//! Fixed names, widths and command templates shared across the crate.

/// Directory name (under the user's home) holding the configuration file.
pub const APP_DIR_NAME: &str = ".wc_builder";

/// Configuration file name within [`APP_DIR_NAME`].
pub const CONFIG_FILENAME: &str = "cfg.yml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "WCB_CONFIG";

/// Profile that replaces filesystem source detection with [`TEST_PROFILE_SOURCES`].
pub const TEST_PROFILE: &str = "test";

/// Subsets every module gets under the test profile.
pub const TEST_PROFILE_SOURCES: [&str; 3] = ["src", "src_test", "src_web"];

/// Total width of command headers and the summary separator.
pub const COMMAND_WIDTH: usize = 128;

pub const HEADER_FILLER: char = '-';
pub const SUMMARY_FILLER: char = '=';

/// Database service bracketing a numeric-key rebuild.
pub const NUM_KEY_SERVICE: &str = "OracleServiceWIND";

/// Default configuration written when none exists yet.
pub const DEFAULT_CONFIG: &str = r#"profile: prod
root: /opt
fail_on_error: false
commands:
  ootb:
    restart: echo "Restarting"
  custom:
    full: echo "Full"
input:
  build_order: ignored/compile.includes
  module_registry: ignored/moduleRegistry.xml
aliases:
  mpml: MPMLink
  mpmlc: MPMLinkCommon
  ppb: ProcessPlanBrowser
  ass: Associative
suites:
  current:
    restart: true
    build:
      MPMLink: cst
      MPMLinkCommon: cst
      ProcessPlanBrowser: cst
"#;

pub fn build_command(location: &str, subset: &str) -> String {
  format!("ant -f {}/{}/build.xml", location, subset)
}

pub fn clobber_command(location: &str, subset: &str) -> String {
  format!("ant clobber -f {}/{}/build.xml", location, subset)
}

pub fn test_command(target: &str, location: &str, subset: &str) -> String {
  format!("ant {} -f {}/{}/build.xml", target, location, subset)
}

/// Suffix restricting a test run to a single test.
pub fn specific_test_suffix(test_name: &str) -> String {
  format!(" -Dtest.includes=**/{}", test_name)
}

/// Clean/clobber/rebuild of the numeric keys, bracketed by a database start and stop.
pub fn num_key_command(location: &str, subset: &str) -> String {
  format!(
    "net start {service}\nant clean clobber numkey -f {}/{}/build.xml\nnet stop {service}",
    location,
    subset,
    service = NUM_KEY_SERVICE
  )
}
