//! Forward conversion: AttributeValue → canonical store-JSON.
//!
//! Every node is written as a single-key object `{"<TAG>": <payload>}`.
//! Object keys are emitted in ascending byte order at every level and absent
//! entries are skipped, so identical logical content always produces
//! identical bytes regardless of the order it was built in.

use crate::error::{Result, SerializeError};
use attribute_core::{number, present, AttributeValue, Item};
use base64::Engine;
use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

/// How string payloads are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Escaping {
    /// Standard JSON string escaping.
    #[default]
    Standard,

    /// Standard escaping plus `<`, `>`, `&`, U+2028 and U+2029 written as
    /// `\u` escapes, byte-compatible with encoders that embed JSON in HTML.
    HtmlSafe,
}

/// Location of a node inside the tree, kept on the stack while walking and
/// rendered only when an error is reported.
enum Path<'a> {
    Root,
    Key(&'a Path<'a>, &'a str),
    Index(&'a Path<'a>, usize),
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Path::Root => f.write_str("$"),
            Path::Key(parent, key) => write!(f, "{parent}.{key}"),
            Path::Index(parent, index) => write!(f, "{parent}[{index}]"),
        }
    }
}

/// Writes attribute values as store-JSON into any [`Write`] sink.
pub struct StoreJsonWriter<W> {
    writer: W,
    escaping: Escaping,
}

impl<W: Write> StoreJsonWriter<W> {
    /// Create a writer with the given escaping mode.
    pub fn new(writer: W, escaping: Escaping) -> Self {
        Self { writer, escaping }
    }

    /// Get the inner sink back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write a top-level item as a bare mapping of name → node.
    pub fn write_item(&mut self, item: &Item) -> Result<()> {
        self.write_entries(item, &Path::Root)
    }

    /// Write a single attribute value node.
    pub fn write_value(&mut self, value: &AttributeValue) -> Result<()> {
        self.write_node(value, &Path::Root)
    }

    fn write_entries(&mut self, map: &Item, path: &Path<'_>) -> Result<()> {
        let mut entries: Vec<(&str, &AttributeValue)> = map
            .iter()
            .filter_map(|(key, slot)| present(slot).map(|value| (key.as_str(), value)))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

        self.writer.write_all(b"{")?;
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                self.writer.write_all(b",")?;
            }
            self.write_string(key)?;
            self.writer.write_all(b":")?;
            self.write_node(value, &Path::Key(path, key))?;
        }
        self.writer.write_all(b"}")?;
        Ok(())
    }

    fn write_node(&mut self, value: &AttributeValue, path: &Path<'_>) -> Result<()> {
        self.writer.write_all(b"{")?;
        self.write_string(value.tag())?;
        self.writer.write_all(b":")?;

        match value {
            AttributeValue::S(s) => self.write_string(s)?,
            AttributeValue::N(n) => self.write_number(n, path)?,
            AttributeValue::Bool(b) | AttributeValue::Null(b) => self.write_bool(*b)?,
            AttributeValue::B(bytes) => self.write_binary(bytes)?,
            AttributeValue::L(items) => {
                self.writer.write_all(b"[")?;
                let mut first = true;
                for (index, item) in items.iter().enumerate() {
                    let Some(item) = present(item) else {
                        continue;
                    };
                    if !first {
                        self.writer.write_all(b",")?;
                    }
                    first = false;
                    self.write_node(item, &Path::Index(path, index))?;
                }
                self.writer.write_all(b"]")?;
            }
            AttributeValue::M(map) => self.write_entries(map, path)?,
            AttributeValue::Ss(members) => {
                self.write_array(members, |w, member, _| w.write_string(member))?
            }
            AttributeValue::Ns(members) => self.write_array(members, |w, member, index| {
                w.write_number(member, &Path::Index(path, index))
            })?,
            AttributeValue::Bs(members) => {
                self.write_array(members, |w, member, _| w.write_binary(member))?
            }
        }

        self.writer.write_all(b"}")?;
        Ok(())
    }

    fn write_array<'v, T: 'v>(
        &mut self,
        members: impl IntoIterator<Item = &'v T>,
        mut write_member: impl FnMut(&mut Self, &'v T, usize) -> Result<()>,
    ) -> Result<()> {
        self.writer.write_all(b"[")?;
        for (index, member) in members.into_iter().enumerate() {
            if index > 0 {
                self.writer.write_all(b",")?;
            }
            write_member(self, member, index)?;
        }
        self.writer.write_all(b"]")?;
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let encoded = serde_json::to_string(s).map_err(io::Error::from)?;
        let encoded = match self.escaping {
            Escaping::Standard => Cow::Borrowed(encoded.as_str()),
            Escaping::HtmlSafe => html_safe(&encoded),
        };
        self.writer.write_all(encoded.as_bytes())?;
        Ok(())
    }

    fn write_number(&mut self, text: &str, path: &Path<'_>) -> Result<()> {
        if !number::is_decimal(text) {
            return Err(SerializeError::InvalidNumber {
                path: path.to_string(),
                value: text.to_string(),
            });
        }
        // Decimal text never needs escaping
        self.writer.write_all(b"\"")?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.write_all(b"\"")?;
        Ok(())
    }

    fn write_bool(&mut self, b: bool) -> Result<()> {
        self.writer
            .write_all(if b { b"true".as_slice() } else { b"false" })?;
        Ok(())
    }

    fn write_binary(&mut self, bytes: &[u8]) -> Result<()> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        self.writer.write_all(b"\"")?;
        self.writer.write_all(encoded.as_bytes())?;
        self.writer.write_all(b"\"")?;
        Ok(())
    }
}

/// Re-escape an already JSON-encoded string for HTML embedding.
///
/// The characters replaced here never occur inside the escape sequences
/// serde_json produces, so a plain character scan is enough.
fn html_safe(encoded: &str) -> Cow<'_, str> {
    const HTML_CHARS: [char; 5] = ['<', '>', '&', '\u{2028}', '\u{2029}'];
    if !encoded.contains(HTML_CHARS) {
        return Cow::Borrowed(encoded);
    }

    let mut out = String::with_capacity(encoded.len() + 16);
    for c in encoded.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Serialize a single attribute value node.
pub fn to_vec(value: &AttributeValue, escaping: Escaping) -> Result<Vec<u8>> {
    let mut writer = StoreJsonWriter::new(Vec::new(), escaping);
    writer.write_value(value)?;
    Ok(writer.into_inner())
}

/// Serialize a top-level item.
pub fn item_to_vec(item: &Item, escaping: Escaping) -> Result<Vec<u8>> {
    let mut writer = StoreJsonWriter::new(Vec::new(), escaping);
    writer.write_item(item)?;
    Ok(writer.into_inner())
}

/// Serialize a single attribute value node to a string.
pub fn to_string(value: &AttributeValue, escaping: Escaping) -> Result<String> {
    utf8(to_vec(value, escaping)?)
}

/// Serialize a top-level item to a string.
pub fn item_to_string(item: &Item, escaping: Escaping) -> Result<String> {
    utf8(item_to_vec(item, escaping)?)
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| SerializeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(value: &AttributeValue) -> String {
        to_string(value, Escaping::Standard).unwrap()
    }

    fn item(entries: Vec<(&str, Option<AttributeValue>)>) -> Item {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_scalar_nodes() {
        assert_eq!(render(&AttributeValue::s("x")), r#"{"S":"x"}"#);
        assert_eq!(render(&AttributeValue::n("123").unwrap()), r#"{"N":"123"}"#);
        assert_eq!(render(&AttributeValue::bool(true)), r#"{"BOOL":true}"#);
        assert_eq!(render(&AttributeValue::bool(false)), r#"{"BOOL":false}"#);
        assert_eq!(render(&AttributeValue::null()), r#"{"NULL":true}"#);
    }

    #[test]
    fn test_binary_is_base64() {
        let value = AttributeValue::binary(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(render(&value), r#"{"B":"3q2+7w=="}"#);
        assert_eq!(render(&AttributeValue::binary(Vec::new())), r#"{"B":""}"#);
    }

    #[test]
    fn test_sets() {
        let ss = AttributeValue::string_set(["pear", "apple"]);
        assert_eq!(render(&ss), r#"{"SS":["apple","pear"]}"#);

        let ns = AttributeValue::number_set(["3", "1.5"]).unwrap();
        assert_eq!(render(&ns), r#"{"NS":["1.5","3"]}"#);

        let bs = AttributeValue::binary_set([b"hi".to_vec(), vec![0u8]]);
        assert_eq!(render(&bs), r#"{"BS":["AA==","aGk="]}"#);
    }

    #[test]
    fn test_list_preserves_order_and_skips_holes() {
        let value = AttributeValue::L(vec![
            Some(AttributeValue::s("b")),
            None,
            Some(AttributeValue::s("a")),
            None,
        ]);
        assert_eq!(render(&value), r#"{"L":[{"S":"b"},{"S":"a"}]}"#);

        let holes_only = AttributeValue::L(vec![None, None]);
        assert_eq!(render(&holes_only), r#"{"L":[]}"#);
    }

    #[test]
    fn test_map_keys_sorted_and_absent_skipped() {
        let value = AttributeValue::M(item(vec![
            ("zeta", Some(AttributeValue::bool(true))),
            ("alpha", Some(AttributeValue::s("a"))),
            ("gone", None),
            ("Beta", Some(AttributeValue::null())),
        ]));
        assert_eq!(
            render(&value),
            r#"{"M":{"Beta":{"NULL":true},"alpha":{"S":"a"},"zeta":{"BOOL":true}}}"#
        );
    }

    #[test]
    fn test_keys_sort_by_bytes() {
        // 'é' (0xC3 0xA9) sorts after every ASCII key
        let value = item(vec![
            ("é", Some(AttributeValue::s("1"))),
            ("z", Some(AttributeValue::s("2"))),
            ("a1", Some(AttributeValue::s("3"))),
            ("a", Some(AttributeValue::s("4"))),
        ]);
        assert_eq!(
            item_to_string(&value, Escaping::Standard).unwrap(),
            r#"{"a":{"S":"4"},"a1":{"S":"3"},"z":{"S":"2"},"é":{"S":"1"}}"#
        );
    }

    #[test]
    fn test_item_skips_absent_top_level_entries() {
        let value = item(vec![
            ("keep", Some(AttributeValue::from(1i64))),
            ("drop", None),
        ]);
        assert_eq!(
            item_to_string(&value, Escaping::Standard).unwrap(),
            r#"{"keep":{"N":"1"}}"#
        );
        assert_eq!(
            item_to_string(&Item::new(), Escaping::Standard).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_nested_absent_entries_skipped_at_depth() {
        let inner = AttributeValue::M(item(vec![("hole", None)]));
        let value = AttributeValue::L(vec![Some(AttributeValue::M(item(vec![
            ("inner", Some(inner)),
            ("hole", None),
        ])))]);
        assert_eq!(render(&value), r#"{"L":[{"M":{"inner":{"M":{}}}}]}"#);
    }

    #[test]
    fn test_list_of_map() {
        let value = AttributeValue::list([AttributeValue::map([("k", AttributeValue::s("v"))])]);
        assert_eq!(render(&value), r#"{"L":[{"M":{"k":{"S":"v"}}}]}"#);
    }

    #[test]
    fn test_string_escaping() {
        let value = AttributeValue::s("quote\" back\\ nl\n tab\t <&> \u{1}");
        assert_eq!(
            render(&value),
            r#"{"S":"quote\" back\\ nl\n tab\t <&> \u0001"}"#
        );
    }

    #[test]
    fn test_non_ascii_passes_through() {
        let value = AttributeValue::map([("clé", AttributeValue::s("naïve ✓ 日本"))]);
        assert_eq!(render(&value), r#"{"M":{"clé":{"S":"naïve ✓ 日本"}}}"#);
    }

    #[test]
    fn test_html_safe_escaping() {
        let value = AttributeValue::map([("<k>", AttributeValue::s("> 0.0.0 & \u{2028}"))]);
        assert_eq!(
            to_string(&value, Escaping::HtmlSafe).unwrap(),
            r#"{"M":{"\u003ck\u003e":{"S":"\u003e 0.0.0 \u0026 \u2028"}}}"#
        );
        // No HTML characters, no change
        assert_eq!(
            to_string(&AttributeValue::s("plain"), Escaping::HtmlSafe).unwrap(),
            r#"{"S":"plain"}"#
        );
    }

    #[test]
    fn test_invalid_number_reports_path() {
        let value = AttributeValue::map([(
            "a",
            AttributeValue::list([AttributeValue::s("ok"), AttributeValue::N("1,5".into())]),
        )]);
        match to_vec(&value, Escaping::Standard) {
            Err(SerializeError::InvalidNumber { path, value }) => {
                assert_eq!(path, "$.a[1]");
                assert_eq!(value, "1,5");
            }
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }

        let ns = AttributeValue::Ns(["1".to_string(), "x".to_string()].into_iter().collect());
        match to_vec(&ns, Escaping::Standard) {
            Err(SerializeError::InvalidNumber { path, .. }) => assert_eq!(path, "$[1]"),
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_failing_sink() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("sink closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut writer = StoreJsonWriter::new(Broken, Escaping::Standard);
        let err = writer.write_value(&AttributeValue::s("x")).unwrap_err();
        assert!(matches!(err, SerializeError::Io(_)));
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            AttributeValue::map([
                ("b", AttributeValue::string_set(["y", "x"])),
                ("a", AttributeValue::list([AttributeValue::from(2i64)])),
                (
                    "c",
                    AttributeValue::map([
                        ("z", AttributeValue::null()),
                        ("y", AttributeValue::bool(true)),
                    ]),
                ),
            ])
        };
        let first = to_vec(&build(), Escaping::Standard).unwrap();
        for _ in 0..10 {
            assert_eq!(to_vec(&build(), Escaping::Standard).unwrap(), first);
        }
    }
}
