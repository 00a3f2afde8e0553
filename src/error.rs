//! Error taxonomy of a single conversion.

use crate::schema::Violation;
use json_types::SerializeError;
use std::fmt;
use thiserror::Error;

/// Which caller-supplied input an error should be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// The JSON document being converted
    Json,
    /// The schema document gating the conversion
    Schema,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Json => f.write_str("json"),
            InputField::Schema => f.write_str("schema"),
        }
    }
}

/// Errors that abort a conversion. None of them leave partial output behind.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input document is not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The schema document is not valid JSON or not a valid schema.
    #[error("Schema compile error: {message}")]
    SchemaCompile { message: String },

    /// The input document does not satisfy the schema.
    #[error("JSON does not satisfy schema: {}", join_violations(.violations))]
    SchemaValidation { violations: Vec<Violation> },

    /// Reserved: lifting is total for parsed JSON.
    #[error("Lift error: {0}")]
    Lift(String),

    /// The attribute value tree is internally inconsistent.
    #[error("Serialization error: {0}")]
    Serialize(#[from] SerializeError),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConvertError {
    /// The input at fault.
    pub fn input(&self) -> InputField {
        match self {
            ConvertError::SchemaCompile { .. } => InputField::Schema,
            ConvertError::Parse(_)
            | ConvertError::SchemaValidation { .. }
            | ConvertError::Lift(_)
            | ConvertError::Serialize(_) => InputField::Json,
        }
    }

    /// Short title for surfacing the error to a user.
    pub fn summary(&self) -> &'static str {
        match self {
            ConvertError::Parse(_) => "JSON parsing failed",
            ConvertError::SchemaCompile { .. } => "Schema compilation failed",
            ConvertError::SchemaValidation { .. } => "Schema validation failed",
            ConvertError::Lift(_) => "Attribute value conversion failed",
            ConvertError::Serialize(_) => "Store-JSON serialization failed",
        }
    }

    /// Whether this error points at a bug rather than bad user input.
    pub fn is_internal(&self) -> bool {
        matches!(self, ConvertError::Lift(_) | ConvertError::Serialize(_))
    }
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
