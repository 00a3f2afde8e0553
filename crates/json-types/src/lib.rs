//! JSON type conversions for attribute-core values.
//!
//! This crate provides the two conversions around the attribute value model:
//!
//! # Modules
//!
//! - [`reverse`] - JSON value → AttributeValue (lifting)
//! - [`forward`] - AttributeValue → canonical store-JSON bytes (lowering)
//!
//! # Example
//!
//! ```
//! use json_types::{forward, reverse, Escaping};
//!
//! let json = serde_json::json!({"c": [true, null], "a": {"b": 1}});
//! let value = reverse::lift(&json);
//! let bytes = forward::to_vec(&value, Escaping::Standard).unwrap();
//! assert_eq!(
//!     String::from_utf8(bytes).unwrap(),
//!     r#"{"M":{"a":{"M":{"b":{"N":"1"}}},"c":{"L":[{"BOOL":true},{"NULL":true}]}}}"#
//! );
//! ```

pub mod error;
pub mod forward;
pub mod reverse;

pub use error::{Result, SerializeError};
pub use forward::{Escaping, StoreJsonWriter};
pub use reverse::{lift, lift_item};
