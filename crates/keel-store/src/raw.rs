use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::debug;

use crate::config::{DiskConfig, SyncMode, FILE_MODE};
use crate::error::{StoreError, StoreResult};

/// Local-disk store for whole-file byte content and encoded objects.
///
/// A `DiskStore` holds only its configuration: every call opens, uses, and
/// releases its own file handle before returning, so one store can be shared
/// freely between threads. Writes to the same path from concurrent callers
/// are not coordinated; the last write to land wins.
///
/// Saves truncate and rewrite in place. There is no atomic-rename step, so a
/// failed save may leave the target empty, truncated, or unchanged.
#[derive(Clone, Debug, Default)]
pub struct DiskStore {
    config: DiskConfig,
}

impl DiskStore {
    /// Create a store with the given configuration.
    pub fn new(config: DiskConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    /// Read the entire file at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> StoreResult<Vec<u8>> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), len = data.len(), "raw load");
        Ok(data)
    }

    /// Replace the contents of `path` with `data`, creating the file with
    /// mode `0644` if it does not exist.
    pub fn save(&self, path: impl AsRef<Path>, data: &[u8]) -> StoreResult<()> {
        let path = path.as_ref();
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = create_file(path).map_err(io_err)?;
        file.write_all(data).map_err(io_err)?;
        self.finish_write(&file).map_err(io_err)?;

        debug!(path = %path.display(), len = data.len(), "raw save");
        Ok(())
    }

    /// Apply the configured sync strategy to a fully written file.
    pub(crate) fn finish_write(&self, file: &File) -> io::Result<()> {
        if matches!(self.config.sync_mode, SyncMode::EveryWrite) {
            file.sync_all()?;
        }
        Ok(())
    }
}

/// Create or truncate `path` for writing. New files get [`FILE_MODE`] on Unix.
pub(crate) fn create_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

/// Read the entire file at `path` using the default configuration.
pub fn load_from_disk(path: impl AsRef<Path>) -> StoreResult<Vec<u8>> {
    DiskStore::default().load(path)
}

/// Write `data` to `path` using the default configuration.
pub fn save_to_disk(path: impl AsRef<Path>, data: &[u8]) -> StoreResult<()> {
    DiskStore::default().save(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_returns_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        save_to_disk(&path, &[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn empty_content_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        save_to_disk(&path, &[]).unwrap();
        assert!(load_from_disk(&path).unwrap().is_empty());
    }

    #[test]
    fn save_overwrites_longer_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overwrite.bin");
        save_to_disk(&path, b"a much longer original body").unwrap();
        save_to_disk(&path, b"short").unwrap();
        assert_eq!(load_from_disk(&path).unwrap(), b"short");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        let err = load_from_disk(&path).unwrap_err();
        match err {
            StoreError::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn error_message_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        let err = load_from_disk(&path).unwrap_err();
        assert!(err.to_string().contains("missing.bin"));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn save_does_not_create_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.bin");
        let err = save_to_disk(&path, b"data").unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!dir.path().join("no").exists());
    }

    #[test]
    fn every_write_sync_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synced.bin");
        let store = DiskStore::new(DiskConfig {
            sync_mode: SyncMode::EveryWrite,
        });
        store.save(&path, b"durable").unwrap();
        assert_eq!(store.load(&path).unwrap(), b"durable");
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_not_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mode.bin");
        save_to_disk(&path, b"x").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // The process umask may clear bits but never adds them.
        assert_eq!(mode & !FILE_MODE, 0, "mode {mode:o}");
        assert_eq!(mode & 0o600, 0o600, "mode {mode:o}");
    }
}
