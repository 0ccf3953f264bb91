//! Command-line interface module for yearsort.
//!
//! This module handles all CLI-related functionality including:
//! - Flag parsing and validation
//! - Merging command-line flags with configuration file defaults
//! - Scan orchestration: enumerate, remap, move (or report)
//! - Per-file error accounting for the final exit status

use crate::config::{BasenameFilter, ConfigError, FileConfig};
use crate::mover::FileMover;
use crate::output::OutputFormatter;
use crate::remap::remap;
use crate::scanner;
use crate::timestamp::TimePolicy;
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Organize folders by file timestamps into year subdirectories.
///
/// Every regular file under the given directories is moved to
/// `<output-dir>/<year>/...`, where the year comes from the file's
/// modification time (or the oldest/newest of its timestamps).
#[derive(Debug, Parser)]
#[command(name = "yearsort", version)]
pub struct Cli {
    /// Source directories to scan.
    #[arg(required = true, value_name = "DIRECTORY")]
    pub directories: Vec<PathBuf>,

    /// Destination root for the year buckets.
    #[arg(short = 'O', long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Leading directory segments to drop from each path (the scanned
    /// directory's own name counts as the first one).
    #[arg(short, long, value_name = "N")]
    pub strip: Option<usize>,

    /// Use the earliest of modification/creation/access times.
    #[arg(short, long, conflicts_with = "newest")]
    pub oldest: bool,

    /// Use the latest of modification/creation/access times.
    #[arg(short, long)]
    pub newest: bool,

    /// Only consider files whose name matches this glob (repeatable).
    #[arg(short, long = "pattern", value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Skip files whose name matches this glob (repeatable).
    #[arg(short = 'P', long = "not-pattern", value_name = "GLOB")]
    pub not_patterns: Vec<String>,

    /// Print intended moves without touching the filesystem.
    #[arg(short, long)]
    pub dry_run: bool,

    /// Overwrite destination files that already exist.
    #[arg(short, long)]
    pub force: bool,

    /// Path to a TOML defaults file.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Fatal errors that abort the run before any file is touched.
#[derive(Debug)]
pub enum CliError {
    /// Configuration file or pattern problem.
    Config(ConfigError),
    /// No output directory on the command line or in the configuration.
    MissingOutputDir,
    /// A source directory does not exist.
    RootNotFound(PathBuf),
    /// A source path exists but is not a directory.
    NotADirectory(PathBuf),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{}", e),
            CliError::MissingOutputDir => {
                write!(
                    f,
                    "No output directory: pass --output-dir or set defaults.output_dir in the configuration file"
                )
            }
            CliError::RootNotFound(path) => {
                write!(f, "Source directory {} does not exist", path.display())
            }
            CliError::NotADirectory(path) => {
                write!(f, "Source path {} is not a directory", path.display())
            }
        }
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

/// Outcome counts for a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    /// Files moved, or reported in dry-run mode.
    pub processed: usize,
    /// Files that could not be processed (metadata or move failures).
    pub failed: usize,
}

/// Runs a full scan-remap-move pass over all requested directories.
///
/// Fatal configuration problems (bad patterns, missing or invalid source
/// directories, no output directory) abort before anything is scanned.
/// Per-file failures are reported as warnings, counted in the summary and
/// do not stop the remaining files from being processed.
///
/// # Errors
///
/// Returns a `CliError` only for the fatal configuration problems above;
/// per-file failures surface through `RunSummary::failed`.
pub fn run(cli: &Cli) -> Result<RunSummary, CliError> {
    let config = FileConfig::load(cli.config.as_deref())?;

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| config.defaults.output_dir.clone())
        .ok_or(CliError::MissingOutputDir)?;
    let strip = cli.strip.unwrap_or(config.defaults.strip);
    let policy = if cli.oldest {
        TimePolicy::Oldest
    } else if cli.newest {
        TimePolicy::Newest
    } else {
        config.defaults.policy
    };

    let filter = BasenameFilter::compile(&cli.patterns, &config.exclude, &cli.not_patterns)?;

    for root in &cli.directories {
        if !root.exists() {
            return Err(CliError::RootNotFound(root.clone()));
        }
        if !root.is_dir() {
            return Err(CliError::NotADirectory(root.clone()));
        }
    }

    let mut summary = RunSummary::default();

    // Plan every move up front so the progress bar knows its total and
    // metadata problems surface before anything is renamed.
    let mut planned: Vec<(PathBuf, PathBuf)> = Vec::new();
    for root in &cli.directories {
        for entry in scanner::scan(root, &filter) {
            let source = entry.into_path();
            match plan_move(root, &source, policy, strip, &output_dir) {
                Ok(destination) => planned.push((source, destination)),
                Err(message) => {
                    OutputFormatter::warning(&message);
                    summary.failed += 1;
                }
            }
        }
    }

    let progress = (!cli.dry_run && planned.len() > 1)
        .then(|| OutputFormatter::create_progress_bar(planned.len() as u64));
    let mut year_counts: HashMap<String, usize> = HashMap::new();

    for (source, destination) in &planned {
        OutputFormatter::move_line(source, destination);

        match FileMover::move_file(source, destination, cli.dry_run, cli.force) {
            Ok(()) => {
                summary.processed += 1;
                if let Some(year) = year_bucket(&output_dir, destination) {
                    *year_counts.entry(year).or_insert(0) += 1;
                }
            }
            Err(e) => {
                OutputFormatter::warning(&e.to_string());
                summary.failed += 1;
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if cli.dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "{} file(s) would be moved; nothing was changed.",
            summary.processed
        ));
    } else if summary.processed > 0 {
        OutputFormatter::year_summary(&year_counts, summary.processed);
    }

    Ok(summary)
}

/// Computes the destination for one scanned file.
///
/// Metadata and remapping failures are folded into a displayable message;
/// the caller treats them as per-file warnings.
fn plan_move(
    root: &Path,
    source: &Path,
    policy: TimePolicy,
    strip: usize,
    output_dir: &Path,
) -> Result<PathBuf, String> {
    let metadata = fs::metadata(source)
        .map_err(|e| format!("Cannot read metadata for {}: {}", source.display(), e))?;
    let timestamp = policy
        .effective_datetime(&metadata)
        .map_err(|e| format!("Cannot read timestamps for {}: {}", source.display(), e))?;

    remap(root, source, timestamp, strip, output_dir).map_err(|e| e.to_string())
}

/// Extracts the year segment a destination was bucketed under.
fn year_bucket(output_dir: &Path, destination: &Path) -> Option<String> {
    destination
        .strip_prefix(output_dir)
        .ok()?
        .components()
        .next()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
}
