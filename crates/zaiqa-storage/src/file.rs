//! # File Storage Backend
//!
//! JSON-file key-value backend: one `<key>.json` file per key inside a
//! data directory.
//!
//! ## Write Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Atomic Write Sequence                              │
//! │                                                                         │
//! │  set("restaurant-storage", doc)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. write doc ──────► restaurant-storage.json.tmp                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. rename tmp ─────► restaurant-storage.json                          │
//! │                                                                         │
//! │  A crash between 1 and 2 leaves the previous value intact.             │
//! │  rename() on the same filesystem replaces the target in one step.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Platform Paths
//! - **macOS**: `~/Library/Application Support/com.zaiqa.zaiqa/`
//! - **Windows**: `%APPDATA%\zaiqa\zaiqa\data\`
//! - **Linux**: `~/.local/share/zaiqa/`
//!
//! Set `ZAIQA_DATA_DIR` to override (useful in development).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::kv::KvStorage;

/// File-backed key-value storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding one `<key>.json` file per key.
    dir: PathBuf,
}

impl FileStorage {
    /// Opens a file storage rooted at `dir`, creating the directory if
    /// needed.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let storage = FileStorage::open("./data").await?;
    /// ```
    pub async fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::DirectoryUnavailable(format!("{}: {}", dir.display(), e))
        })?;

        info!(dir = %dir.display(), "File storage opened");
        Ok(FileStorage { dir })
    }

    /// Opens file storage in the platform's app-data directory.
    ///
    /// ## Development Override
    /// Set the `ZAIQA_DATA_DIR` environment variable to use a custom path.
    pub async fn open_default() -> StorageResult<Self> {
        Self::open(Self::default_dir()?).await
    }

    /// Resolves the platform data directory (or the env override).
    pub fn default_dir() -> StorageResult<PathBuf> {
        if let Ok(path) = std::env::var("ZAIQA_DATA_DIR") {
            return Ok(PathBuf::from(path));
        }

        let proj_dirs = ProjectDirs::from("com", "zaiqa", "zaiqa").ok_or_else(|| {
            StorageError::DirectoryUnavailable(
                "could not determine app data directory".to_string(),
            )
        })?;

        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// The directory this storage reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStorage for FileStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => {
                debug!(key, bytes = value.len(), "Storage read");
                Ok(Some(value))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        let tmp_path = self.dir.join(format!("{key}.json.tmp"));

        tokio::fs::write(&tmp_path, value).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        debug!(key, bytes = value.len(), "Storage write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Storage key removed");
                Ok(())
            }
            // Removing an absent key is not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_DIR_SEQ: AtomicU64 = AtomicU64::new(0);

    fn unique_test_dir() -> PathBuf {
        let seq = TEST_DIR_SEQ.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "zaiqa-storage-test-{}-{}",
            std::process::id(),
            seq
        ))
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let storage = FileStorage::open(unique_test_dir()).await.unwrap();
        assert_eq!(storage.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let storage = FileStorage::open(unique_test_dir()).await.unwrap();

        storage.set("doc", r#"{"hello":"world"}"#).await.unwrap();
        let value = storage.get("doc").await.unwrap();

        assert_eq!(value.as_deref(), Some(r#"{"hello":"world"}"#));
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let storage = FileStorage::open(unique_test_dir()).await.unwrap();

        storage.set("doc", "first").await.unwrap();
        storage.set("doc", "second").await.unwrap();

        assert_eq!(storage.get("doc").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let storage = FileStorage::open(unique_test_dir()).await.unwrap();

        storage.set("doc", "value").await.unwrap();
        storage.remove("doc").await.unwrap();
        assert_eq!(storage.get("doc").await.unwrap(), None);

        // Second remove of the same key succeeds too
        storage.remove("doc").await.unwrap();
    }

    #[tokio::test]
    async fn test_no_tmp_file_left_behind() {
        let dir = unique_test_dir();
        let storage = FileStorage::open(&dir).await.unwrap();

        storage.set("doc", "value").await.unwrap();

        assert!(dir.join("doc.json").exists());
        assert!(!dir.join("doc.json.tmp").exists());
    }
}
