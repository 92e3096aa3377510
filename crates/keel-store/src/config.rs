use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Permission bits for newly created files: owner read/write, group and
/// other read-only.
pub const FILE_MODE: u32 = 0o644;

/// Flush/sync strategy applied after each save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncMode {
    /// Flush to the OS and rely on page-cache write-back (fastest).
    #[default]
    OsDefault,
    /// `fsync` the file before the save returns (most durable).
    EveryWrite,
}

/// Configuration for a [`DiskStore`](crate::DiskStore).
///
/// Loadable from TOML:
///
/// ```toml
/// sync_mode = "every-write"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiskConfig {
    /// Sync strategy for raw and encoded saves.
    pub sync_mode: SyncMode,
}

impl DiskConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiskConfig::default();
        assert_eq!(c.sync_mode, SyncMode::OsDefault);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        assert_eq!(DiskConfig::from_toml_str("").unwrap(), DiskConfig::default());
    }

    #[test]
    fn parses_sync_mode() {
        let c = DiskConfig::from_toml_str("sync_mode = \"every-write\"").unwrap();
        assert_eq!(c.sync_mode, SyncMode::EveryWrite);
    }

    #[test]
    fn rejects_unknown_sync_mode() {
        let err = DiskConfig::from_toml_str("sync_mode = \"sometimes\"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = DiskConfig::from_toml_str("file_mode = 493").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keel.toml");
        std::fs::write(&path, "sync_mode = \"os-default\"\n").unwrap();
        assert_eq!(DiskConfig::load(&path).unwrap(), DiskConfig::default());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DiskConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
