use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("timestamp out of range: seconds={seconds}, nanos={nanos}")]
    InvalidTimestamp { seconds: i64, nanos: i32 },
}

/// The secure random source could not supply bytes.
///
/// Identifier generation must never degrade to a predictable value, so this
/// error is fatal for the operation that requested the identifier. Callers
/// decide whether to abort the process or retry later.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("secure random source unavailable: {reason}")]
pub struct EntropyError {
    pub reason: String,
}
