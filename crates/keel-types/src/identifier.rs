use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::{Uuid, Variant, Version};

use crate::error::{EntropyError, TypeError};

/// Random unique identifier (RFC 4122 version 4).
///
/// Rendered as 36 lowercase characters in 8-4-4-4-12 groups. The version
/// nibble is always `4` and the variant nibble is one of `8`, `9`, `a`, `b`.
/// Uniqueness is probabilistic; issued identifiers are not tracked.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a fresh identifier from the operating system's CSPRNG.
    ///
    /// Fails only if the random source cannot supply 16 bytes. The failure is
    /// returned as-is and never retried here.
    pub fn generate() -> Result<Self, EntropyError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate an identifier from the given cryptographically secure RNG.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, EntropyError> {
        let mut bytes = [0u8; 16];
        rng.try_fill_bytes(&mut bytes).map_err(|e| EntropyError {
            reason: e.to_string(),
        })?;
        Ok(Self::from_random_bytes(bytes))
    }

    /// Stamp the RFC 4122 variant (byte 8, `10xxxxxx`) and version 4
    /// (byte 6, `0100xxxx`) markers onto 16 random bytes.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The raw 16 bytes, markers included.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl TryFrom<Uuid> for Identifier {
    type Error = TypeError;

    fn try_from(uuid: Uuid) -> Result<Self, TypeError> {
        if uuid.get_variant() != Variant::RFC4122 {
            return Err(TypeError::InvalidIdentifier(format!(
                "{uuid}: not an RFC 4122 variant"
            )));
        }
        if uuid.get_version() != Some(Version::Random) {
            return Err(TypeError::InvalidIdentifier(format!(
                "{uuid}: not a version 4 identifier"
            )));
        }
        Ok(Self(uuid))
    }
}

impl FromStr for Identifier {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, TypeError> {
        let uuid = Uuid::parse_str(s).map_err(|e| TypeError::InvalidIdentifier(e.to_string()))?;
        Self::try_from(uuid)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.short_id())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let uuid = Uuid::deserialize(deserializer)?;
        Self::try_from(uuid).map_err(serde::de::Error::custom)
    }
}

/// Generate a fresh random identifier, rendered in canonical form.
pub fn generate_uuid() -> Result<Identifier, EntropyError> {
    Identifier::generate()
}
