//! Destination path computation.
//!
//! This module contains the pure remapping function that decides where a
//! scanned file ends up under the output directory. It never touches the
//! filesystem: given the same inputs it always produces the same destination,
//! which is what makes it independently testable.

use chrono::{DateTime, Datelike, Local};
use std::path::{Path, PathBuf};

/// Errors that can occur while computing a destination path.
#[derive(Debug, Clone)]
pub enum RemapError {
    /// The file path does not live under the scanned root.
    NotUnderRoot {
        /// The offending file path.
        file: PathBuf,
        /// The root it was expected under.
        root: PathBuf,
    },
    /// The path has no final filename component (e.g. the root itself).
    MissingFileName(PathBuf),
}

impl std::fmt::Display for RemapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemapError::NotUnderRoot { file, root } => {
                write!(
                    f,
                    "File {} is not under the scanned root {}",
                    file.display(),
                    root.display()
                )
            }
            RemapError::MissingFileName(path) => {
                write!(f, "Path {} has no filename component", path.display())
            }
        }
    }
}

impl std::error::Error for RemapError {}

/// Result type for remapping operations.
pub type RemapResult<T> = Result<T, RemapError>;

/// Computes the destination for a file found under a scanned root.
///
/// The destination is `output_dir / <year> / <kept segments> / <filename>`,
/// where `<year>` is the four-digit calendar year of `timestamp` in the
/// process-local timezone, and `<kept segments>` are the directory segments
/// of the file's path after dropping the first `strip` of them.
///
/// The scanned root's own directory name counts as the first strippable
/// segment, so `--strip=1` on `yearsort example` turns
/// `example/subdir/photo.jpg` into `<output>/<year>/subdir/photo.jpg`, and
/// `--strip=0` keeps the full `example/subdir/` prefix under the year bucket.
/// `strip` values larger than the number of directory segments are clamped;
/// the filename itself is never stripped.
///
/// # Errors
///
/// Returns `RemapError::NotUnderRoot` if `file_path` is not prefixed by
/// `root`, and `RemapError::MissingFileName` if the path ends without a
/// filename (only possible when `file_path` equals the root).
pub fn remap(
    root: &Path,
    file_path: &Path,
    timestamp: DateTime<Local>,
    strip: usize,
    output_dir: &Path,
) -> RemapResult<PathBuf> {
    let under_root = file_path
        .strip_prefix(root)
        .map_err(|_| RemapError::NotUnderRoot {
            file: file_path.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    // The root's last component participates in stripping; roots like "."
    // or "/" contribute no segment of their own.
    let relative = match root.file_name() {
        Some(name) => Path::new(name).join(under_root),
        None => under_root.to_path_buf(),
    };

    let file_name = relative
        .file_name()
        .map(|n| n.to_os_string())
        .ok_or_else(|| RemapError::MissingFileName(file_path.to_path_buf()))?;

    let dir_segments: Vec<_> = match relative.parent() {
        Some(parent) => parent.components().collect(),
        None => Vec::new(),
    };

    let mut destination = output_dir.join(format!("{:04}", timestamp.year()));
    // skip() saturates, which gives the clamping required for large strip
    // values: only directory segments are ever dropped, never the filename.
    for segment in dir_segments.into_iter().skip(strip) {
        destination.push(segment);
    }
    destination.push(file_name);

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn year(y: i32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_strip_zero_preserves_relative_structure() {
        let dest = remap(
            Path::new("example"),
            Path::new("example/subdir/photo.jpg"),
            year(2013),
            0,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(dest, PathBuf::from("output/2013/example/subdir/photo.jpg"));
    }

    #[test]
    fn test_strip_one_drops_root_segment() {
        let dest = remap(
            Path::new("example"),
            Path::new("example/subdir/photo.jpg"),
            year(2001),
            1,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(dest, PathBuf::from("output/2001/subdir/photo.jpg"));
    }

    #[test]
    fn test_file_directly_under_root_with_strip_one() {
        let dest = remap(
            Path::new("example"),
            Path::new("example/2013-03-02.jpg"),
            year(2013),
            1,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(dest, PathBuf::from("output/2013/2013-03-02.jpg"));
    }

    #[test]
    fn test_strip_clamps_to_basename() {
        // More strip than directory segments: everything but the filename
        // goes, without error.
        let dest = remap(
            Path::new("example"),
            Path::new("example/a/b/c/photo.jpg"),
            year(1999),
            99,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(dest, PathBuf::from("output/1999/photo.jpg"));
    }

    #[test]
    fn test_absolute_root_strips_like_relative_root() {
        let dest = remap(
            Path::new("/data/dump/example"),
            Path::new("/data/dump/example/subdir/photo.jpg"),
            year(2004),
            1,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(dest, PathBuf::from("output/2004/subdir/photo.jpg"));
    }

    #[test]
    fn test_not_under_root_is_an_error() {
        let result = remap(
            Path::new("example"),
            Path::new("elsewhere/photo.jpg"),
            year(2013),
            0,
            Path::new("output"),
        );

        assert!(matches!(result, Err(RemapError::NotUnderRoot { .. })));
    }

    #[test]
    fn test_remap_is_pure() {
        let first = remap(
            Path::new("example"),
            Path::new("example/subdir/photo.jpg"),
            year(2013),
            1,
            Path::new("output"),
        )
        .unwrap();
        let second = remap(
            Path::new("example"),
            Path::new("example/subdir/photo.jpg"),
            year(2013),
            1,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_year_is_zero_padded() {
        let dest = remap(
            Path::new("example"),
            Path::new("example/old.txt"),
            year(800),
            1,
            Path::new("output"),
        )
        .unwrap();

        assert_eq!(dest, PathBuf::from("output/0800/old.txt"));
    }
}
