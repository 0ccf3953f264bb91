//! yearsort - move files into year-named subdirectories
//!
//! This library provides the pieces behind the `yearsort` binary: a pure
//! destination-path remapper, timestamp selection policies, recursive
//! scanning with basename filtering, a guarded file mover, and the TOML
//! configuration layer that supplies run defaults.

pub mod cli;
pub mod config;
pub mod mover;
pub mod output;
pub mod remap;
pub mod scanner;
pub mod timestamp;

pub use config::{BasenameFilter, ConfigError, Defaults, ExcludeRules, FileConfig};
pub use mover::{FileMover, MoveError};
pub use remap::{RemapError, remap};
pub use timestamp::TimePolicy;

pub use cli::{Cli, CliError, RunSummary, run};
