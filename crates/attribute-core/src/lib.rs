//! Core types for the json2dynamodb conversion pipeline.
//!
//! This crate provides the typed value model shared by the lifting and
//! lowering halves of the pipeline:
//!
//! - [`AttributeValue`] - Tagged union mirroring the store's ten attribute kinds
//! - [`AttributeType`] - Fieldless tag of an [`AttributeValue`]
//! - [`Item`] - Top-level mapping of attribute name to value
//! - [`number`] - Canonical decimal text for `N` and `NS` payloads
//!
//! # Architecture
//!
//! ```text
//! attribute-core (this crate)
//!    │
//!    ├─── json-types      (lifts serde_json values, lowers to store-JSON)
//!    │
//!    └─── json2dynamodb   (parse → schema gate → lift → lower)
//! ```
//!
//! # Example
//!
//! ```rust
//! use attribute_core::{AttributeType, AttributeValue};
//!
//! let value = AttributeValue::list(vec![
//!     AttributeValue::s("hello"),
//!     AttributeValue::n("42").unwrap(),
//! ]);
//! assert_eq!(value.attribute_type(), AttributeType::L);
//! assert_eq!(value.tag(), "L");
//! ```

pub mod number;
pub mod types;
pub mod values;

pub use types::AttributeType;
pub use values::{present, AttributeValue, Item};
