use std::io;
use std::path::PathBuf;

/// Errors from disk store operations.
///
/// Every file-layer and codec error carries the offending path and the
/// underlying cause.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be created or truncated for an encoded save.
    #[error("unable to create file {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be opened for an encoded load.
    #[error("unable to load file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The object could not be serialized.
    #[error("unable to encode object before saving to file {}: {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },

    /// The file contents could not be decoded into the requested type.
    #[error("unable to decode loaded file {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },

    /// The store configuration is malformed.
    #[error("invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// The path the failed operation targeted, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. }
            | Self::Create { path, .. }
            | Self::Open { path, .. }
            | Self::Encode { path, .. }
            | Self::Decode { path, .. } => Some(path),
            Self::Config(_) => None,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
