//! Error types for json-types crate.

use thiserror::Error;

/// Errors that can occur while lowering attribute values to store-JSON.
///
/// A tree produced by lifting JSON never triggers these; they signal an
/// inconsistent tree built elsewhere or a failing output sink.
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("Number attribute at {path} is not decimal text: {value:?}")]
    InvalidNumber { path: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for json-types operations.
pub type Result<T> = std::result::Result<T, SerializeError>;
