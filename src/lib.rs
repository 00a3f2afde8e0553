//! json2dynamodb Library
//!
//! Converts arbitrary JSON documents into the canonical attribute-value JSON
//! ("store-JSON") understood by DynamoDB's low-level API, optionally gated by
//! a JSON Schema.
//!
//! # Features
//!
//! - Type inference: JSON shapes map onto `S`, `N`, `BOOL`, `NULL`, `L` and `M`
//! - Canonical output: keys sorted at every level, so equal documents produce equal bytes
//! - Exact numbers: number text is carried through unchanged, never via floats
//! - Schema gate: documents are validated before conversion when a schema is supplied
//! - Normalization: whitespace/key-order insensitive comparison of JSON inputs
//!
//! # Example
//!
//! ```
//! let out = json2dynamodb::convert(br#"{"c":[true,null],"a":{"b":1}}"#, None).unwrap();
//! assert_eq!(
//!     out,
//!     br#"{"a":{"M":{"b":{"N":"1"}}},"c":{"L":[{"BOOL":true},{"NULL":true}]}}"#
//! );
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Convert a file, validating against a schema
//! json2dynamodb convert --input item.json --schema item.schema.json
//!
//! # Convert stdin with HTML-safe escaping
//! cat item.json | json2dynamodb convert --html-safe
//!
//! # Compare two JSON documents ignoring formatting
//! json2dynamodb diff old.json new.json
//! ```

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

pub mod convert;
pub mod error;
pub mod normalize;
pub mod schema;

pub use attribute_core::{AttributeType, AttributeValue, Item};
pub use convert::{convert, convert_with, ConvertOptions, Converter};
pub use error::{ConvertError, InputField, Result};
pub use json_types::Escaping;
pub use normalize::{equivalent, normalize_json};
pub use schema::{SchemaGate, Violation};

/// Path value that stands for standard input.
pub const STDIN: &str = "-";

#[derive(Parser, Clone, Debug)]
pub struct ConvertOpts {
    /// JSON Schema file the document must satisfy (empty file disables validation)
    #[arg(long, value_name = "PATH", env = "JSON2DYNAMODB_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Escape <, > and & in strings as \u sequences
    #[arg(long, env = "JSON2DYNAMODB_HTML_SAFE")]
    pub html_safe: bool,
}

impl ConvertOpts {
    /// Conversion options selected on the command line.
    pub fn options(&self) -> ConvertOptions {
        if self.html_safe {
            ConvertOptions::html_safe()
        } else {
            ConvertOptions::default()
        }
    }

    /// Build a converter, reading and compiling the schema file if one is set.
    pub fn converter(&self) -> anyhow::Result<Converter> {
        let schema = match &self.schema {
            Some(path) => Some(
                std::fs::read(path)
                    .with_context(|| format!("Failed to read schema from {path:?}"))?,
            ),
            None => None,
        };
        let converter = Converter::with_schema(self.options(), schema.as_deref())
            .with_context(|| format!("Failed to load schema from {:?}", self.schema))?;
        Ok(converter)
    }
}

/// Read a whole input, where `-` means standard input.
pub fn read_source(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == STDIN {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read standard input")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {path:?}"))
}
