//! JSON text normalization.
//!
//! Two documents that differ only in whitespace or object key order
//! normalize to the same text, which lets callers suppress spurious diffs
//! between a stored document and a freshly supplied one.

use crate::error::{ConvertError, Result};
use serde_json::Value;

/// Compact JSON text with object keys sorted at every level.
pub fn normalize_json(raw: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(raw).map_err(ConvertError::Parse)?;
    Ok(normalize_value(&value))
}

/// Compact JSON text of an already parsed value, keys sorted.
pub fn normalize_value(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Whether two JSON texts are the same document.
///
/// Texts that do not parse are only equivalent when byte-identical.
pub fn equivalent(a: &[u8], b: &[u8]) -> bool {
    match (normalize_json(a), normalize_json(b)) {
        (Ok(a), Ok(b)) => a == b,
        (Err(_), Err(_)) => a == b,
        _ => false,
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::from(key.as_str()).to_string());
                out.push(':');
                write_canonical(value, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorts_keys_and_strips_whitespace() {
        let normalized = normalize_json(
            br#"{
                "b": [3, {"z": null, "y": true}],
                "a": "text"
            }"#,
        )
        .unwrap();
        assert_eq!(normalized, r#"{"a":"text","b":[3,{"y":true,"z":null}]}"#);
    }

    #[test]
    fn test_keeps_number_text_and_escapes_strings() {
        let normalized = normalize_json(r#"{"n": 1.50, "s": "a\"bé"}"#.as_bytes()).unwrap();
        assert_eq!(normalized, r#"{"n":1.50,"s":"a\"bé"}"#);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            normalize_json(b"{,}"),
            Err(ConvertError::Parse(_))
        ));
    }

    #[test]
    fn test_equivalent() {
        assert!(equivalent(br#"{"a":1,"b":2}"#, br#"{ "b": 2, "a": 1 }"#));
        assert!(!equivalent(br#"{"a":1}"#, br#"{"a":2}"#));
        assert!(!equivalent(br#"[1,2]"#, br#"[2,1]"#));
        assert!(!equivalent(br#"{"a":1}"#, b"{"));
        assert!(equivalent(b"{", b"{"));
        assert!(!equivalent(b"{", b"["));
    }
}
