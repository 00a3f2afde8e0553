//! Schema gate.
//!
//! Validates the parsed JSON document against a JSON Schema before it is
//! lifted. Validation runs on the generic JSON form because schema
//! vocabularies describe JSON shapes, not attribute types.

use crate::error::{ConvertError, Result};
use serde_json::Value;
use std::fmt;

/// A single way in which a document fails its schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending part of the document (empty for the root)
    pub instance_path: String,
    /// JSON pointer to the schema keyword that rejected it
    pub schema_path: String,
    /// Human readable description
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "/"
        } else {
            &self.instance_path
        };
        write!(f, "{at}: {}", self.message)
    }
}

impl From<jsonschema::ValidationError<'_>> for Violation {
    fn from(error: jsonschema::ValidationError<'_>) -> Self {
        Self {
            instance_path: error.instance_path.to_string(),
            schema_path: error.schema_path.to_string(),
            message: error.to_string(),
        }
    }
}

/// A compiled schema, reusable across many documents.
pub struct SchemaGate {
    validator: jsonschema::Validator,
}

impl fmt::Debug for SchemaGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaGate").finish_non_exhaustive()
    }
}

impl SchemaGate {
    /// Compile a schema document.
    ///
    /// Returns `Ok(None)` when the document is empty or only whitespace: an
    /// unconfigured gate lets every document through.
    pub fn compile(schema: &[u8]) -> Result<Option<Self>> {
        if schema.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!("Schema is empty, skipping validation");
            return Ok(None);
        }

        let schema: Value =
            serde_json::from_slice(schema).map_err(|e| ConvertError::SchemaCompile {
                message: format!("schema is not valid JSON: {e}"),
            })?;
        Self::from_value(&schema).map(Some)
    }

    /// Compile an already parsed schema.
    pub fn from_value(schema: &Value) -> Result<Self> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| ConvertError::SchemaCompile {
                message: e.to_string(),
            })?;
        tracing::debug!("Compiled schema");
        Ok(Self { validator })
    }

    /// Check a document, collecting every violation.
    ///
    /// Numbers outside the `f64` range cannot be checked by the validator, so
    /// each one is reported as a violation and the document is rejected before
    /// any schema keyword runs.
    pub fn validate(&self, instance: &Value) -> std::result::Result<(), Vec<Violation>> {
        let mut violations = Vec::new();
        out_of_range_numbers(instance, &mut String::new(), &mut violations);
        if violations.is_empty() {
            violations.extend(self.validator.iter_errors(instance).map(Violation::from));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Check a document, mapping violations to a conversion error.
    pub fn check(&self, instance: &Value) -> Result<()> {
        self.validate(instance).map_err(|violations| {
            tracing::debug!("Schema validation failed with {} violations", violations.len());
            ConvertError::SchemaValidation { violations }
        })
    }
}

/// Collect every number in `value` that has no finite `f64` form.
fn out_of_range_numbers(value: &Value, pointer: &mut String, out: &mut Vec<Violation>) {
    match value {
        Value::Number(n) if n.as_f64().is_none() => out.push(Violation {
            instance_path: pointer.clone(),
            schema_path: String::new(),
            message: format!("{n} is outside the range of numbers the schema can check"),
        }),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&index.to_string());
                out_of_range_numbers(item, pointer, out);
                pointer.truncate(len);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));
                out_of_range_numbers(item, pointer, out);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}
