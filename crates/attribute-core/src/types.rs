//! Attribute type tags.

use std::fmt;

/// The ten attribute kinds understood by the store.
///
/// Every [`AttributeValue`](crate::AttributeValue) has exactly one of these
/// tags; the tag text is the single key of the node in store-JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeType {
    /// UTF-8 string
    S,
    /// Decimal number kept as exact text
    N,
    /// Boolean
    Bool,
    /// Explicit null marker
    Null,
    /// Raw binary
    B,
    /// Heterogeneous ordered list
    L,
    /// Nested map
    M,
    /// String set
    Ss,
    /// Number set
    Ns,
    /// Binary set
    Bs,
}

impl AttributeType {
    /// Wire tag used as the key of a store-JSON node.
    pub fn tag(self) -> &'static str {
        match self {
            AttributeType::S => "S",
            AttributeType::N => "N",
            AttributeType::Bool => "BOOL",
            AttributeType::Null => "NULL",
            AttributeType::B => "B",
            AttributeType::L => "L",
            AttributeType::M => "M",
            AttributeType::Ss => "SS",
            AttributeType::Ns => "NS",
            AttributeType::Bs => "BS",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tags() {
        let tags: Vec<&str> = [
            AttributeType::S,
            AttributeType::N,
            AttributeType::Bool,
            AttributeType::Null,
            AttributeType::B,
            AttributeType::L,
            AttributeType::M,
            AttributeType::Ss,
            AttributeType::Ns,
            AttributeType::Bs,
        ]
        .iter()
        .map(|t| t.tag())
        .collect();
        assert_eq!(
            tags,
            vec!["S", "N", "BOOL", "NULL", "B", "L", "M", "SS", "NS", "BS"]
        );
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(AttributeType::Bool.to_string(), "BOOL");
        assert_eq!(AttributeType::Bs.to_string(), "BS");
    }
}
