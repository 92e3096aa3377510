//! Structured object persistence.
//!
//! Objects are written as a single CBOR item, a self-describing binary
//! encoding that keeps field names and value types. There is no schema
//! versioning: decoding a file written by a materially different type
//! definition fails with [`StoreError::Decode`]. That covers missing fields,
//! mismatched types, and stored fields the destination type would discard.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind};
use std::path::Path;

use ciborium::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::raw::{create_file, DiskStore};

/// Capability of a type to be encoded to and decoded from disk.
///
/// Types opt in by deriving `serde::Serialize` and `serde::Deserialize`;
/// the blanket impl covers every such type. Values the encoding cannot
/// represent surface as [`StoreError::Encode`]. On load, every stored field
/// must land in the destination type or the load fails with
/// [`StoreError::Decode`].
pub trait Persistable: Serialize + DeserializeOwned {}

impl<T: Serialize + DeserializeOwned> Persistable for T {}

impl DiskStore {
    /// Encode `object` and write it to `path`, replacing any existing file.
    ///
    /// The file is created before encoding starts; if encoding fails the
    /// target is left truncated or partially written.
    pub fn encode_save<T: Persistable>(&self, path: impl AsRef<Path>, object: &T) -> StoreResult<()> {
        let path = path.as_ref();
        let file = create_file(path).map_err(|source| StoreError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        ciborium::into_writer(object, &mut writer).map_err(|e| match e {
            ciborium::ser::Error::Io(source) => StoreError::Io {
                path: path.to_path_buf(),
                source,
            },
            ciborium::ser::Error::Value(reason) => StoreError::Encode {
                path: path.to_path_buf(),
                reason,
            },
        })?;

        let file = writer.into_inner().map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e.into_error(),
        })?;
        self.finish_write(&file).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "encoded save");
        Ok(())
    }

    /// Read `path` and decode its contents as a `T`.
    ///
    /// The file must hold exactly one encoded value. Truncated or malformed
    /// content is a decode error, as is trailing data. So is a structural
    /// mismatch with `T`, including stored fields `T` has no place for.
    pub fn load_decode<T: Persistable>(&self, path: impl AsRef<Path>) -> StoreResult<T> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let decode_err = |reason: String| {
            warn!(path = %path.display(), %reason, "decode failed");
            StoreError::Decode {
                path: path.to_path_buf(),
                reason,
            }
        };

        let mut reader = BufReader::new(file);
        let stored: Value = ciborium::from_reader(&mut reader).map_err(|e| decode_err(e.to_string()))?;
        match at_end(&mut reader) {
            Ok(true) => {}
            Ok(false) => return Err(decode_err("trailing bytes after encoded object".into())),
            Err(e) => return Err(decode_err(e.to_string())),
        }

        let value: T = stored.deserialized().map_err(|e| decode_err(e.to_string()))?;
        let kept = Value::serialized(&value).map_err(|e| decode_err(e.to_string()))?;
        if let Some(field) = first_dropped(&stored, &kept) {
            return Err(decode_err(format!(
                "stored field `{field}` has no counterpart in the destination type"
            )));
        }

        debug!(path = %path.display(), "decoded load");
        Ok(value)
    }

    /// Decode `path` into `destination`.
    ///
    /// `destination` is only overwritten once the whole file has decoded
    /// successfully; on any error it keeps its previous value.
    pub fn load_decode_into<T: Persistable>(
        &self,
        path: impl AsRef<Path>,
        destination: &mut T,
    ) -> StoreResult<()> {
        *destination = self.load_decode(path)?;
        Ok(())
    }
}

/// Whether `reader` has nothing left to yield.
fn at_end(reader: &mut impl BufRead) -> io::Result<bool> {
    loop {
        match reader.fill_buf() {
            Ok(rest) => return Ok(rest.is_empty()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Path of the first map entry or sequence element present in `stored` but
/// absent from `kept`, the re-encoding of the decoded value.
fn first_dropped(stored: &Value, kept: &Value) -> Option<String> {
    match (stored, kept) {
        (Value::Map(stored), Value::Map(kept)) => {
            for (i, (key, value)) in stored.iter().enumerate() {
                let counterpart = match kept.get(i) {
                    Some((k, v)) if k == key => Some(v),
                    _ => kept.iter().find(|(k, _)| k == key).map(|(_, v)| v),
                };
                let label = match key {
                    Value::Text(name) => name.clone(),
                    other => format!("{other:?}"),
                };
                match counterpart {
                    None => return Some(label),
                    Some(v) => {
                        if let Some(inner) = first_dropped(value, v) {
                            return Some(format!("{label}.{inner}"));
                        }
                    }
                }
            }
            None
        }
        (Value::Array(stored), Value::Array(kept)) => {
            if stored.len() > kept.len() {
                return Some(kept.len().to_string());
            }
            stored
                .iter()
                .zip(kept)
                .enumerate()
                .find_map(|(i, (s, k))| first_dropped(s, k).map(|inner| format!("{i}.{inner}")))
        }
        (Value::Tag(a, stored), Value::Tag(b, kept)) if a == b => first_dropped(stored, kept),
        _ => None,
    }
}

/// Encode `object` to `path` using the default configuration.
pub fn encode_save_to_disk<T: Persistable>(path: impl AsRef<Path>, object: &T) -> StoreResult<()> {
    DiskStore::default().encode_save(path, object)
}

/// Decode the object stored at `path` using the default configuration.
pub fn load_decode_from_disk<T: Persistable>(path: impl AsRef<Path>) -> StoreResult<T> {
    DiskStore::default().load_decode(path)
}

/// Decode the object stored at `path` into `destination`, leaving it
/// untouched on failure.
pub fn load_decode_into<T: Persistable>(path: impl AsRef<Path>, destination: &mut T) -> StoreResult<()> {
    DiskStore::default().load_decode_into(path, destination)
}
