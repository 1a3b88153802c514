//! wcbuild-lib: module catalog, target resolution and task execution for `wcb`
//!
//! The pipeline a `wcb` run goes through:
//! - `config`: YAML settings (profile, root, commands, aliases, suites)
//! - `catalog`: modules from the XML registry, ranked by the build order file
//! - `spec` and `resolve`: `module_codes` tokens turned into modules and source subsets
//! - `builder`: the ordered task list for an invocation
//! - `execute`: sequential shell execution and the run summary

pub mod builder;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod execute;
pub mod platform;
pub mod resolve;
pub mod spec;
pub mod task;
pub mod util;
