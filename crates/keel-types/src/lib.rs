//! Foundation types for Keel.
//!
//! This crate provides the identity, integrity, and temporal value types
//! shared by the other Keel crates.
//!
//! # Key Types
//!
//! - [`Digest`] - 64-byte content digest
//! - [`Identifier`] - random RFC 4122 version-4 identifier
//! - [`Timestamp`] - UTC instant as seconds + nanoseconds

pub mod digest;
pub mod error;
pub mod identifier;
pub mod timestamp;

pub use digest::{Digest, DIGEST_LEN};
pub use error::{EntropyError, TypeError};
pub use identifier::{generate_uuid, Identifier};
pub use timestamp::{create_utc_timestamp, Timestamp};
