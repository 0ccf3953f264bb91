//! File relocation with an overwrite guard.
//!
//! This module performs the actual move of a single file to its computed
//! destination. It creates missing ancestor directories, refuses to clobber
//! an existing destination unless forced, and leaves the source untouched
//! on failure. Each move is an atomic rename; there is no rollback across
//! files.

use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while moving a file into place.
#[derive(Debug)]
pub enum MoveError {
    /// The destination file already exists and `--force` was not given.
    DestinationExists {
        /// The destination that was already occupied.
        destination: PathBuf,
    },
    /// Failed to create the destination's ancestor directories.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The rename itself failed (permissions, cross-device, ...).
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// The destination has no parent directory to create.
    NoParent { destination: PathBuf },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DestinationExists { destination } => {
                write!(
                    f,
                    "Destination {} already exists (use --force to overwrite)",
                    destination.display()
                )
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::RenameFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            Self::NoParent { destination } => {
                write!(
                    f,
                    "Cannot compute a parent directory for {}",
                    destination.display()
                )
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Result type for file move operations.
pub type MoveResult<T> = Result<T, MoveError>;

/// Moves files to their computed destinations.
pub struct FileMover;

impl FileMover {
    /// Moves `source` to `destination`, creating missing ancestors.
    ///
    /// With `dry_run` set no filesystem mutation happens at all; the call
    /// succeeds so the caller can report the intended pair. Otherwise the
    /// destination's ancestor directories are created, an existing
    /// destination is refused unless `force` is set, and the file is
    /// renamed into place.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::DestinationExists` when the overwrite guard
    /// triggers, or the underlying IO error for directory creation and
    /// rename failures. The source file is left in place on any error.
    pub fn move_file(
        source: &Path,
        destination: &Path,
        dry_run: bool,
        force: bool,
    ) -> MoveResult<()> {
        if dry_run {
            return Ok(());
        }

        let parent = destination.parent().ok_or_else(|| MoveError::NoParent {
            destination: destination.to_path_buf(),
        })?;

        fs::create_dir_all(parent).map_err(|e| MoveError::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;

        if !force && destination.exists() {
            return Err(MoveError::DestinationExists {
                destination: destination.to_path_buf(),
            });
        }

        fs::rename(source, destination).map_err(|e| MoveError::RenameFailed {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_creates_missing_ancestors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("photo.jpg");
        fs::write(&source, "content").expect("Failed to write test file");

        let destination = temp_dir.path().join("output/2013/subdir/photo.jpg");
        FileMover::move_file(&source, &destination, false, false).expect("Failed to move file");

        assert!(!source.exists());
        assert!(destination.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "content");
    }

    #[test]
    fn test_existing_destination_is_refused() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("new.txt");
        let destination = temp_dir.path().join("out/new.txt");
        fs::write(&source, "new").unwrap();
        fs::create_dir_all(destination.parent().unwrap()).unwrap();
        fs::write(&destination, "old").unwrap();

        let result = FileMover::move_file(&source, &destination, false, false);

        assert!(matches!(result, Err(MoveError::DestinationExists { .. })));
        // The guard leaves both files untouched.
        assert!(source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "old");
    }

    #[test]
    fn test_force_overwrites_existing_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("new.txt");
        let destination = temp_dir.path().join("out/new.txt");
        fs::write(&source, "new").unwrap();
        fs::create_dir_all(destination.parent().unwrap()).unwrap();
        fs::write(&destination, "old").unwrap();

        FileMover::move_file(&source, &destination, false, true).expect("Failed to move file");

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "new");
    }

    #[test]
    fn test_dry_run_mutates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("photo.jpg");
        fs::write(&source, "content").unwrap();
        let destination = temp_dir.path().join("output/2013/photo.jpg");

        FileMover::move_file(&source, &destination, true, false).expect("Dry run should succeed");

        assert!(source.exists());
        assert!(!destination.exists());
        assert!(!temp_dir.path().join("output").exists());
    }

    #[test]
    fn test_missing_source_reports_rename_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("gone.txt");
        let destination = temp_dir.path().join("out/gone.txt");

        let result = FileMover::move_file(&source, &destination, false, false);
        assert!(matches!(result, Err(MoveError::RenameFailed { .. })));
    }
}
