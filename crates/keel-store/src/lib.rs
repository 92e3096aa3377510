//! Local-disk persistence for Keel.
//!
//! Two layers share one file-creation path:
//!
//! - raw byte files - [`DiskStore::load`] / [`DiskStore::save`]
//! - structured objects - [`DiskStore::encode_save`] /
//!   [`DiskStore::load_decode`], encoded as self-describing CBOR
//!
//! Free functions ([`load_from_disk`], [`save_to_disk`],
//! [`encode_save_to_disk`], [`load_decode_from_disk`]) use the default
//! configuration.
//!
//! # Design Rules
//!
//! 1. Whole-file semantics: saves create-or-truncate, loads read everything.
//! 2. New files get mode `0644` on Unix.
//! 3. Every file handle is released before the call returns, on every path.
//! 4. Errors carry the path and cause; nothing is retried or swallowed.
//! 5. No locking: concurrent writers to one path race at the filesystem.

pub mod config;
pub mod error;
pub mod persist;
pub mod raw;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{DiskConfig, SyncMode, FILE_MODE};
pub use error::{StoreError, StoreResult};
pub use persist::{encode_save_to_disk, load_decode_from_disk, load_decode_into, Persistable};
pub use raw::{load_from_disk, save_to_disk, DiskStore};
