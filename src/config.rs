//! Defaults and file filtering configuration.
//!
//! This module loads optional run defaults from a TOML configuration file
//! and compiles the exclusion rules (from the file and from the command
//! line) into an efficient basename matcher. Supported filtering strategies:
//! - Exact filename matching
//! - Glob pattern matching (shell semantics: `*`, `?`, character classes)
//! - Regex pattern matching (configuration file only)
//! - Include globs that restrict the scan to matching names
//!
//! # Configuration File Format
//!
//! ```toml
//! [defaults]
//! output_dir = "sorted"
//! strip = 0
//! policy = "modified"
//!
//! [exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*~", ".*"]
//! regex = []
//! ```

use crate::timestamp::TimePolicy;
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading and filter compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Run defaults and exclusion rules loaded from a configuration file.
///
/// Command-line flags take precedence over every value in here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Fallback values for flags that were not given on the command line.
    #[serde(default)]
    pub defaults: Defaults,

    /// Rules for excluding files from the scan.
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Fallback values for command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Defaults {
    /// Destination root used when `--output-dir` is absent.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Leading directory segments to drop. Defaults to 0.
    #[serde(default)]
    pub strip: usize,

    /// Timestamp policy: "modified", "oldest" or "newest".
    #[serde(default)]
    pub policy: TimePolicy,
}

/// Rules for excluding files from the scan, matched against basenames only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., ".DS_Store", "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude (e.g., "*~", ".*").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns to exclude (for advanced users).
    #[serde(default)]
    pub regex: Vec<String>,
}

impl FileConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.yearsortrc.toml` in the current directory
    /// 3. Look for `~/.config/yearsort/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".yearsortrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("yearsort")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

/// Compiled basename matcher used to decide which scanned files to process.
///
/// All patterns are validated and compiled once, before scanning begins, so
/// that a malformed pattern aborts the run instead of surfacing per-file.
/// Matching is applied to file basenames only; directories are always
/// descended regardless of their names. Leading-dot files are not
/// special-cased: excluding them requires an explicit `.*` pattern.
pub struct BasenameFilter {
    include_patterns: Vec<Pattern>,
    exclude_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
}

impl BasenameFilter {
    /// Compile include globs, configuration exclusion rules and extra
    /// command-line exclusion globs into one matcher.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex pattern is invalid.
    pub fn compile(
        include: &[String],
        rules: &ExcludeRules,
        extra_patterns: &[String],
    ) -> Result<Self, ConfigError> {
        let include_patterns = compile_globs(include)?;

        let mut exclude_patterns = compile_globs(&rules.patterns)?;
        exclude_patterns.extend(compile_globs(extra_patterns)?);

        let exclude_regexes = rules
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_patterns,
            exclude_filenames: rules.filenames.iter().cloned().collect(),
            exclude_patterns,
            exclude_regexes,
        })
    }

    /// Check whether a file with this basename should be processed.
    ///
    /// A file is processed when it matches at least one include pattern
    /// (an empty include set matches everything) and none of the exclusion
    /// rules.
    pub fn is_match(&self, basename: &str) -> bool {
        let included = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| p.matches(basename));
        if !included {
            return false;
        }

        if self.exclude_filenames.contains(basename) {
            return false;
        }

        if self.exclude_patterns.iter().any(|p| p.matches(basename)) {
            return false;
        }

        !self.exclude_regexes.iter().any(|r| r.is_match(basename))
    }
}

fn compile_globs(patterns: &[String]) -> Result<Vec<Pattern>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
        })
        .collect()
}
