//! Snapshot file loading.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Snapshot;

/// Errors that can occur while reading snapshot files.
#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    /// I/O error during file read.
    #[error("failed to read snapshot file '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a valid snapshot.
    #[error("failed to parse snapshot file '{path}': {source}")]
    Parse {
        /// The path that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for snapshot store operations.
pub type SnapshotStoreResult<T> = std::result::Result<T, SnapshotStoreError>;

/// Reads a snapshot file.
///
/// # Example
///
/// ```no_run
/// use pod_filter_rs::snapshot::SnapshotStore;
///
/// let store = SnapshotStore::new("pods.json");
/// let snapshot = store.load()?;
/// println!("{} pods", snapshot.pods.len());
/// # Ok::<(), pod_filter_rs::snapshot::SnapshotStoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store for the snapshot file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot from disk.
    ///
    /// # Errors
    ///
    /// - Returns `SnapshotStoreError::Read` if the file cannot be read.
    /// - Returns `SnapshotStoreError::Parse` if the file is not a valid snapshot.
    pub fn load(&self) -> SnapshotStoreResult<Snapshot> {
        let contents = fs::read_to_string(&self.path).map_err(|e| SnapshotStoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| SnapshotStoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ContainerSnapshot, NetworkSnapshot, PodSnapshot};
    use crate::model::ContainerState;
    use chrono::DateTime;
    use tempfile::tempdir;

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            pods: vec![PodSnapshot {
                id: "abc123".to_string(),
                name: "web".to_string(),
                created: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
                labels: [("app".to_string(), "web".to_string())].into(),
                containers: vec![ContainerSnapshot {
                    id: "c1".to_string(),
                    name: "web-infra".to_string(),
                    state: ContainerState::Running,
                    infra: true,
                    networks: vec!["podman".to_string()],
                }],
            }],
            networks: vec![NetworkSnapshot {
                name: "podman".to_string(),
                id: "2f259bab93aa".to_string(),
            }],
        }
    }

    #[test]
    fn test_load_written_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pods.json");
        fs::write(&path, serde_json::to_string_pretty(&sample_snapshot()).unwrap()).unwrap();

        let store = SnapshotStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.load().unwrap(), sample_snapshot());
    }

    #[test]
    fn test_read_error_includes_file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = SnapshotStore::new(&path).load().unwrap_err();

        match &err {
            SnapshotStoreError::Read { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Read error, got {other:?}"),
        }
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_parse_error_includes_file_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SnapshotStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SnapshotStoreError::Parse { .. }));
        assert!(err
            .to_string()
            .starts_with("failed to parse snapshot file"));
    }
}
