//! Attribute value representation.
//!
//! This module defines the typed tree produced by lifting a JSON document and
//! consumed by the store-JSON serializer.

use crate::number;
use crate::types::AttributeType;
use std::collections::{BTreeSet, HashMap};

/// Top-level mapping of attribute name to value.
///
/// `None` is the "no value" sentinel: such entries are skipped when the item
/// is serialized. Iteration order of the map carries no meaning; serializers
/// sort keys explicitly.
pub type Item = HashMap<String, Option<AttributeValue>>;

/// A single attribute value.
///
/// Exactly one tag is populated per node by construction. Containers own
/// their children, so a tree can never contain shared or cyclic references.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// UTF-8 string
    S(String),

    /// Decimal number stored as exact text
    N(String),

    /// Boolean value
    Bool(bool),

    /// Null marker (payload is conventionally `true`)
    Null(bool),

    /// Raw binary data
    B(Vec<u8>),

    /// Ordered list; `None` elements are holes and are never serialized
    L(Vec<Option<AttributeValue>>),

    /// Nested map
    M(Item),

    /// String set
    Ss(BTreeSet<String>),

    /// Number set, members are decimal text
    Ns(BTreeSet<String>),

    /// Binary set
    Bs(BTreeSet<Vec<u8>>),
}

/// The shared "is this payload present" predicate.
///
/// Every place that may hold the "no value" sentinel (top-level items, `M`
/// entries, `L` elements) goes through this function, so the skip rule lives
/// in one place.
pub fn present<T>(slot: &Option<T>) -> Option<&T> {
    slot.as_ref()
}

impl AttributeValue {
    /// Create a string value.
    pub fn s(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    /// Create a number value from decimal text.
    ///
    /// Returns `None` if `text` is not a number literal. Exponent notation is
    /// expanded, see [`number::canonical_decimal`].
    pub fn n(text: impl AsRef<str>) -> Option<Self> {
        number::canonical_decimal(text.as_ref()).map(Self::N)
    }

    /// Create a number value from a native float.
    ///
    /// Returns `None` for NaN and infinities.
    pub fn n_from_f64(value: f64) -> Option<Self> {
        number::from_f64(value).map(Self::N)
    }

    /// Create a boolean value.
    pub fn bool(value: bool) -> Self {
        Self::Bool(value)
    }

    /// Create a null marker.
    pub fn null() -> Self {
        Self::Null(true)
    }

    /// Create a binary value.
    pub fn binary(value: impl Into<Vec<u8>>) -> Self {
        Self::B(value.into())
    }

    /// Create a list with every element present.
    pub fn list(values: impl IntoIterator<Item = AttributeValue>) -> Self {
        Self::L(values.into_iter().map(Some).collect())
    }

    /// Create a map with every entry present.
    ///
    /// Later duplicate keys overwrite earlier ones.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, AttributeValue)>) -> Self {
        Self::M(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v)))
                .collect(),
        )
    }

    /// Create a string set. Duplicates collapse.
    pub fn string_set<S: Into<String>>(members: impl IntoIterator<Item = S>) -> Self {
        Self::Ss(members.into_iter().map(Into::into).collect())
    }

    /// Create a number set. Returns `None` if any member is not a number.
    ///
    /// Members are compared by numeric value, so `1`, `1.0` and `1e0` are a
    /// single member, stored as `1` (see [`number::set_member`]).
    pub fn number_set<S: AsRef<str>>(members: impl IntoIterator<Item = S>) -> Option<Self> {
        members
            .into_iter()
            .map(|m| number::set_member(m.as_ref()))
            .collect::<Option<BTreeSet<_>>>()
            .map(Self::Ns)
    }

    /// Create a binary set. Duplicates collapse.
    pub fn binary_set<B: Into<Vec<u8>>>(members: impl IntoIterator<Item = B>) -> Self {
        Self::Bs(members.into_iter().map(Into::into).collect())
    }

    /// The tag of this value.
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            Self::S(_) => AttributeType::S,
            Self::N(_) => AttributeType::N,
            Self::Bool(_) => AttributeType::Bool,
            Self::Null(_) => AttributeType::Null,
            Self::B(_) => AttributeType::B,
            Self::L(_) => AttributeType::L,
            Self::M(_) => AttributeType::M,
            Self::Ss(_) => AttributeType::Ss,
            Self::Ns(_) => AttributeType::Ns,
            Self::Bs(_) => AttributeType::Bs,
        }
    }

    /// Wire tag of this value (`"S"`, `"BOOL"`, ...).
    pub fn tag(&self) -> &'static str {
        self.attribute_type().tag()
    }

    /// Check if this value is a null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null(_))
    }

    /// Try to get this value as a string.
    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as number text.
    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            _ => None,
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as binary data.
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::B(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_list(&self) -> Option<&[Option<AttributeValue>]> {
        match self {
            Self::L(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get this value as a map.
    pub fn as_map(&self) -> Option<&Item> {
        match self {
            Self::M(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a present entry of a map value.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.as_map()
            .and_then(|map| map.get(key))
            .and_then(present)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::N(value.to_string())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::N(value.to_string())
    }
}
