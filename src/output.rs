//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: the plain `move`
//! announcement lines on stdout, colored warnings and errors on stderr,
//! a progress bar for larger move batches, and the per-year summary table.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints the announcement line for one processed file.
    ///
    /// The format is stable and machine-friendly, with Debug-style quoting:
    /// `move "<source>" "<destination>"`. It is printed for dry runs too;
    /// dry-run suppresses only the filesystem mutation.
    pub fn move_line(source: &Path, destination: &Path) {
        println!("move {:?} {:?}", source, destination);
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark to stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol to stderr.
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates and returns a progress bar for file move operations.
    ///
    /// The bar draws on stderr, so the `move` lines on stdout stay clean.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table of moved files per year bucket.
    pub fn year_summary(year_counts: &HashMap<String, usize>, total_files: usize) {
        println!("\n{}", "SUMMARY".bold());

        // Sort years for consistent output
        let mut years: Vec<_> = year_counts.iter().collect();
        years.sort_by_key(|&(year, _)| year);

        println!("{:<8} | {}", "Year".bold(), "Files".bold());
        println!("{}", "-".repeat(18));

        for (year, count) in &years {
            let file_word = if **count == 1 { "file" } else { "files" };
            println!("{:<8} | {} {}", year, count.to_string().green(), file_word);
        }

        println!("{}", "-".repeat(18));
        println!(
            "{:<8} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
        );
    }
}
