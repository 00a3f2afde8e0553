//! The conversion pipeline.
//!
//! ```text
//! raw JSON ─parse─▶ serde_json::Value ─[schema gate]─▶ lift ─▶ AttributeValue ─lower─▶ bytes
//! ```
//!
//! Every step is pure and synchronous. An error at any step aborts the whole
//! conversion; no partial output is ever returned.

use crate::error::{ConvertError, Result};
use crate::schema::SchemaGate;
use json_types::{forward, reverse, Escaping};
use serde_json::Value;

/// Options that shape the produced bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// String escaping used in the output
    pub escaping: Escaping,
}

impl ConvertOptions {
    /// Options producing HTML-safe escaping.
    pub fn html_safe() -> Self {
        Self {
            escaping: Escaping::HtmlSafe,
        }
    }
}

/// A configured pipeline, reusable across documents and threads.
#[derive(Debug, Default)]
pub struct Converter {
    options: ConvertOptions,
    gate: Option<SchemaGate>,
}

impl Converter {
    /// Create a converter without a schema gate.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            gate: None,
        }
    }

    /// Create a converter gated by `schema`.
    ///
    /// An absent, empty or whitespace-only schema leaves the gate off.
    pub fn with_schema(options: ConvertOptions, schema: Option<&[u8]>) -> Result<Self> {
        let gate = match schema {
            Some(schema) => SchemaGate::compile(schema)?,
            None => None,
        };
        Ok(Self { options, gate })
    }

    /// Whether documents are validated before conversion.
    pub fn has_schema(&self) -> bool {
        self.gate.is_some()
    }

    /// Convert raw JSON text.
    pub fn convert(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let value = parse(raw)?;
        self.convert_value(&value)
    }

    /// Convert an already parsed document.
    ///
    /// A JSON object becomes a bare item mapping (`{"name":{"S":"x"}}`);
    /// any other value becomes a single node (`{"L":[...]}`).
    pub fn convert_value(&self, value: &Value) -> Result<Vec<u8>> {
        run(self.options, self.gate.as_ref(), value)
    }
}

/// Convert raw JSON text with default options, optionally gated by a schema.
///
/// The document is parsed before the schema is compiled, so a document that
/// is not JSON is reported as such even when the schema is broken too.
pub fn convert(raw: &[u8], schema: Option<&[u8]>) -> Result<Vec<u8>> {
    convert_with(ConvertOptions::default(), raw, schema)
}

/// Convert raw JSON text with explicit options.
pub fn convert_with(options: ConvertOptions, raw: &[u8], schema: Option<&[u8]>) -> Result<Vec<u8>> {
    let value = parse(raw)?;
    let gate = match schema {
        Some(schema) => SchemaGate::compile(schema)?,
        None => None,
    };
    run(options, gate.as_ref(), &value)
}

fn parse(raw: &[u8]) -> Result<Value> {
    let value = serde_json::from_slice(raw).map_err(ConvertError::Parse)?;
    tracing::debug!("Parsed {} bytes of JSON", raw.len());
    Ok(value)
}

fn run(options: ConvertOptions, gate: Option<&SchemaGate>, value: &Value) -> Result<Vec<u8>> {
    if let Some(gate) = gate {
        gate.check(value)?;
        tracing::debug!("Document satisfies schema");
    }

    let bytes = match value {
        Value::Object(map) => {
            let item = reverse::lift_item(map);
            tracing::debug!("Lifted item with {} attributes", item.len());
            forward::item_to_vec(&item, options.escaping)?
        }
        other => {
            let attribute = reverse::lift(other);
            tracing::debug!("Lifted single {} attribute", attribute.tag());
            forward::to_vec(&attribute, options.escaping)?
        }
    };

    tracing::debug!("Serialized {} bytes of store-JSON", bytes.len());
    Ok(bytes)
}
