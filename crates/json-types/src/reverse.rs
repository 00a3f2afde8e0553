//! Reverse conversion: JSON value → AttributeValue.
//!
//! Lifting infers an attribute type for every JSON shape. It is total: any
//! parsed JSON document has a representation, so there is no error path.
//!
//! | JSON | Attribute |
//! |---|---|
//! | `null` | `NULL(true)` |
//! | `true` / `false` | `BOOL` |
//! | number | `N` (source text, exponent expanded) |
//! | string | `S` |
//! | array | `L` |
//! | object | `M` |
//!
//! Binary values and sets have no JSON syntax and are never produced here.

use attribute_core::{number, AttributeValue, Item};
use serde_json::{Map, Number, Value};

/// Lift a JSON value into an attribute value.
pub fn lift(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::null(),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(number_text(n)),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(|v| Some(lift(v))).collect()),
        Value::Object(map) => AttributeValue::M(lift_item(map)),
    }
}

/// Lift a JSON object into a top-level item, one entry per key.
pub fn lift_item(map: &Map<String, Value>) -> Item {
    map.iter()
        .map(|(key, value)| (key.clone(), Some(lift(value))))
        .collect()
}

/// Decimal text for a parsed JSON number.
///
/// With serde_json's `arbitrary_precision` the number keeps its source text;
/// otherwise this is the shortest float rendering, which may use exponent
/// notation and is expanded the same way.
fn number_text(n: &Number) -> String {
    let text = n.to_string();
    number::canonical_decimal(&text).unwrap_or(text)
}
