//! Disk snapshot of the station directory.
//!
//! The directory response is large and changes rarely, so a fetched copy
//! can be kept on disk and reused across restarts until it expires.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::rasp::StationsList;

use super::error::DirectoryError;

/// Default snapshot TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Snapshot file contents with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDirectory {
    /// Unix timestamp when the snapshot was written.
    cached_at_secs: u64,
    directory: StationsList,
}

/// Configuration for the directory snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Path to the snapshot file.
    pub path: PathBuf,
    /// How long a snapshot remains valid.
    pub ttl: Duration,
}

impl SnapshotConfig {
    /// Create a new config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Disk snapshot of the station directory.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    config: SnapshotConfig,
}

impl DirectorySnapshot {
    pub fn new(config: SnapshotConfig) -> Self {
        Self { config }
    }

    /// Try to load the directory from disk.
    ///
    /// Returns `None` if the file doesn't exist, is invalid, or has expired.
    pub fn load(&self) -> Option<StationsList> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let stored: StoredDirectory = serde_json::from_str(&contents).ok()?;

        let now = unix_now().ok()?;
        let age_secs = now.saturating_sub(stored.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(stored.directory)
    }

    /// Write the directory to disk, creating parent directories as needed.
    pub fn save(&self, directory: &StationsList) -> Result<(), DirectoryError> {
        let stored = StoredDirectory {
            cached_at_secs: unix_now()?,
            directory: directory.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| DirectoryError::Snapshot {
                message: format!("failed to create snapshot directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&stored).map_err(|e| DirectoryError::Snapshot {
            message: format!("failed to serialize snapshot: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| DirectoryError::Snapshot {
            message: format!("failed to write snapshot file: {}", e),
        })
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn unix_now() -> Result<u64, DirectoryError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| DirectoryError::Snapshot {
            message: "system time before unix epoch".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::Country;
    use tempfile::tempdir;

    fn directory() -> StationsList {
        StationsList {
            countries: vec![Country {
                title: "Россия".to_string(),
                regions: vec![],
            }],
        }
    }

    #[test]
    fn save_and_load_snapshot() {
        let dir = tempdir().unwrap();
        let snapshot = DirectorySnapshot::new(SnapshotConfig::new(dir.path().join("dir.json")));

        snapshot.save(&directory()).unwrap();

        let loaded = snapshot.load().unwrap();
        assert_eq!(loaded.countries.len(), 1);
        assert_eq!(loaded.countries[0].title, "Россия");
    }

    #[test]
    fn expired_snapshot_returns_none() {
        let dir = tempdir().unwrap();
        let config = SnapshotConfig::new(dir.path().join("dir.json")).with_ttl(Duration::ZERO);
        let snapshot = DirectorySnapshot::new(config);

        snapshot.save(&directory()).unwrap();
        assert!(snapshot.load().is_none());
    }

    #[test]
    fn missing_snapshot_returns_none() {
        let snapshot = DirectorySnapshot::new(SnapshotConfig::new("/nonexistent/path/dir.json"));
        assert!(snapshot.load().is_none());
    }

    #[test]
    fn corrupt_snapshot_returns_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dir.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(DirectorySnapshot::new(SnapshotConfig::new(&path)).load().is_none());
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("directory.json");
        let snapshot = DirectorySnapshot::new(SnapshotConfig::new(&path));

        snapshot.save(&directory()).unwrap();
        assert!(path.exists());
        assert_eq!(snapshot.path(), path.as_path());
    }
}
