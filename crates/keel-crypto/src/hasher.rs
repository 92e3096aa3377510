use keel_types::{Digest, DIGEST_LEN};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;

/// System-wide content hasher: SHAKE-256 squeezed to exactly 64 bytes.
///
/// The output length is fixed for compatibility across the whole system; no
/// key, salt, or domain tag is mixed in, so the digest is a function of the
/// input bytes alone.
///
/// Use [`CryptoHasher::hash`] for one-shot hashing, or feed data
/// incrementally with [`update`](CryptoHasher::update) and
/// [`finalize`](CryptoHasher::finalize).
#[derive(Clone, Default)]
pub struct CryptoHasher {
    state: Shake256,
}

impl CryptoHasher {
    /// Create a hasher with empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb more input.
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        Update::update(&mut self.state, data);
        self
    }

    /// Squeeze the 64-byte digest of everything absorbed so far.
    pub fn finalize(self) -> Digest {
        let mut out = [0u8; DIGEST_LEN];
        self.state.finalize_xof().read(&mut out);
        Digest::from_hash(out)
    }

    /// Hash raw bytes.
    pub fn hash(data: &[u8]) -> Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Hash a serializable value as JSON.
    pub fn hash_json<T: serde::Serialize>(value: &T) -> Result<Digest, HasherError> {
        let data =
            serde_json::to_vec(value).map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(Self::hash(&data))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(data: &[u8], expected: &Digest) -> bool {
        Self::hash(data) == *expected
    }
}

impl std::fmt::Debug for CryptoHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CryptoHasher(shake256/{DIGEST_LEN})")
    }
}

/// Compute the 64-byte crypto hash of `data`.
///
/// Every component that needs a content hash goes through this function, so
/// the algorithm can only change in one place.
pub fn compute_crypto_hash(data: &[u8]) -> Digest {
    CryptoHasher::hash(data)
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const EMPTY_DIGEST: &str = "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f\
                                d75dc4ddd8c0f200cb05019d67b592f6fc821c49479ab48640292eacb3b7c4be";

    #[test]
    fn empty_input_matches_known_constant() {
        assert_eq!(compute_crypto_hash(&[]).to_hex(), EMPTY_DIGEST);
    }

    #[test]
    fn known_vector() {
        let digest = compute_crypto_hash(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            digest.to_hex(),
            "2f671343d9b2e1604dc9dcf0753e5fe15c7c64a0d283cbbf722d411a0e36f6ca\
             1d01d1369a23539cd80f7c054b6e5daf9c962cad5b8ed5bd11998b40d5734442"
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(compute_crypto_hash(data), compute_crypto_hash(data));
    }

    #[test]
    fn different_inputs_produce_different_digests() {
        assert_ne!(compute_crypto_hash(b"hello"), compute_crypto_hash(b"world"));
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut hasher = CryptoHasher::new();
        hasher.update(b"hello").update(b" ").update(b"world");
        assert_eq!(hasher.finalize(), compute_crypto_hash(b"hello world"));
    }

    #[test]
    fn verify_correct_data() {
        let digest = CryptoHasher::hash(b"test data");
        assert!(CryptoHasher::verify(b"test data", &digest));
    }

    #[test]
    fn verify_incorrect_data() {
        let digest = CryptoHasher::hash(b"original");
        assert!(!CryptoHasher::verify(b"tampered", &digest));
    }

    #[test]
    fn hash_json_hashes_compact_encoding() {
        let value = serde_json::json!({"key": "value", "num": 42});
        let digest = CryptoHasher::hash_json(&value).unwrap();
        assert_eq!(digest, compute_crypto_hash(br#"{"key":"value","num":42}"#));
        assert_eq!(
            digest.to_hex(),
            "d4d475d0bddae995afeedbdb99673597630d2160ba9021fba6fb234b1e3268c8\
             21d59f5338845a6dde878ea126eda2fc5c1621225c13013f1fae0974e3d7fe63"
        );
    }

    #[test]
    fn hash_json_reports_serialization_failure() {
        use std::collections::HashMap;
        // JSON object keys must be strings.
        let mut value = HashMap::new();
        value.insert(vec![1u8], 1u8);
        assert!(matches!(
            CryptoHasher::hash_json(&value),
            Err(HasherError::Serialization(_))
        ));
    }

    proptest! {
        #[test]
        fn digest_is_always_64_bytes_and_repeatable(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let a = compute_crypto_hash(&data);
            let b = compute_crypto_hash(&data);
            prop_assert_eq!(a.as_bytes().len(), DIGEST_LEN);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn chunking_does_not_change_digest(data in proptest::collection::vec(any::<u8>(), 0..1024), split in 0usize..1024) {
            let split = split.min(data.len());
            let mut hasher = CryptoHasher::new();
            hasher.update(&data[..split]).update(&data[split..]);
            prop_assert_eq!(hasher.finalize(), compute_crypto_hash(&data));
        }
    }
}
