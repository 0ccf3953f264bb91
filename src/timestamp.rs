//! Timestamp selection policies.
//!
//! A file's year bucket is derived from its filesystem metadata. The default
//! uses the modification time alone; the `oldest` and `newest` policies take
//! the extreme of whichever of modification/creation/access times the
//! platform exposes. Years are computed in the process-local timezone and
//! are not normalized.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::io;
use std::time::SystemTime;

/// Which filesystem timestamp determines a file's effective date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePolicy {
    /// Modification time alone.
    #[default]
    Modified,
    /// The earliest of modification/creation/access times.
    Oldest,
    /// The latest of modification/creation/access times.
    Newest,
}

impl TimePolicy {
    /// Selects the effective timestamp for a file from its metadata.
    ///
    /// Creation and access times that the platform does not support are
    /// silently skipped; the modification time is always consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the modification time itself is unavailable.
    pub fn effective_time(self, metadata: &Metadata) -> io::Result<SystemTime> {
        let modified = metadata.modified()?;

        let selected = match self {
            TimePolicy::Modified => modified,
            TimePolicy::Oldest => {
                let mut earliest = modified;
                if let Ok(created) = metadata.created() {
                    earliest = earliest.min(created);
                }
                if let Ok(accessed) = metadata.accessed() {
                    earliest = earliest.min(accessed);
                }
                earliest
            }
            TimePolicy::Newest => {
                let mut latest = modified;
                if let Ok(created) = metadata.created() {
                    latest = latest.max(created);
                }
                if let Ok(accessed) = metadata.accessed() {
                    latest = latest.max(accessed);
                }
                latest
            }
        };

        Ok(selected)
    }

    /// Selects the effective timestamp and converts it to a local datetime.
    pub fn effective_datetime(self, metadata: &Metadata) -> io::Result<DateTime<Local>> {
        self.effective_time(metadata).map(DateTime::<Local>::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use filetime::FileTime;
    use std::fs;
    use tempfile::TempDir;

    fn file_with_mtime(dir: &TempDir, name: &str, unix_secs: i64) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, b"x").expect("Failed to write test file");
        filetime::set_file_mtime(&path, FileTime::from_unix_time(unix_secs, 0))
            .expect("Failed to set mtime");
        path
    }

    #[test]
    fn test_modified_policy_uses_mtime() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        // 2001-07-14 in any timezone within +-12h of UTC noon.
        let path = file_with_mtime(&dir, "a.txt", 995112000);
        let metadata = fs::metadata(&path).unwrap();

        let dt = TimePolicy::Modified.effective_datetime(&metadata).unwrap();
        assert_eq!(dt.year(), 2001);
    }

    #[test]
    fn test_oldest_picks_the_past_mtime() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        // The file was just created, so creation/access times are current;
        // the backdated mtime must win under the oldest policy.
        let path = file_with_mtime(&dir, "b.txt", 995112000);
        let metadata = fs::metadata(&path).unwrap();

        let dt = TimePolicy::Oldest.effective_datetime(&metadata).unwrap();
        assert_eq!(dt.year(), 2001);
    }

    #[test]
    fn test_newest_is_at_least_mtime() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = file_with_mtime(&dir, "c.txt", 995112000);
        let metadata = fs::metadata(&path).unwrap();

        let newest = TimePolicy::Newest.effective_time(&metadata).unwrap();
        let modified = metadata.modified().unwrap();
        assert!(newest >= modified);
    }

    #[test]
    fn test_policy_deserializes_from_lowercase() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            policy: TimePolicy,
        }

        let parsed: Wrapper = toml::from_str("policy = \"oldest\"").unwrap();
        assert_eq!(parsed.policy, TimePolicy::Oldest);
    }
}
