//! Cryptographic primitives for Keel.
//!
//! Provides the system-wide content hash (SHAKE-256 squeezed to 64 bytes) and
//! the standard base64 encoding used to render digests as text.
//!
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod encoding;
pub mod hasher;

pub use encoding::{decode_from_b64, encode_to_b64, EncodingError};
pub use hasher::{compute_crypto_hash, CryptoHasher, HasherError};
