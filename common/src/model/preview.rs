//! Result of applying a schema (or AI generation) to parsed data.
//!
//! The remote service decides the shape; the renderer only assumes that the
//! top level is a map of section names to values and picks a layout for each
//! value with [`SectionView::of`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Section name used when the service answers with something other than an
/// object.
pub const RESULT_SECTION: &str = "result";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreviewData(Value);

impl PreviewData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level sections in the order the service sent them.
    pub fn sections(&self) -> Vec<PreviewSection<'_>> {
        match &self.0 {
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| PreviewSection {
                    key: key.as_str(),
                    title: humanize_key(key),
                    value,
                })
                .collect(),
            other => vec![PreviewSection {
                key: RESULT_SECTION,
                title: humanize_key(RESULT_SECTION),
                value: other,
            }],
        }
    }
}

impl From<Value> for PreviewData {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSection<'a> {
    pub key: &'a str,
    pub title: String,
    pub value: &'a Value,
}

/// How a single value is laid out by the preview renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionView<'a> {
    Primitive(String),
    /// An object, rendered as field/value rows.
    KeyValue(Vec<(&'a str, &'a Value)>),
    /// An array whose first element is an object. `headers` is the union of
    /// keys across all rows, in first-seen order.
    Table {
        headers: Vec<&'a str>,
        rows: &'a [Value],
    },
    /// Any other non-empty array.
    List(&'a [Value]),
    Empty,
}

impl<'a> SectionView<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => {
                SectionView::KeyValue(map.iter().map(|(k, v)| (k.as_str(), v)).collect())
            }
            Value::Array(items) if items.is_empty() => SectionView::Empty,
            Value::Array(items) if items[0].is_object() => SectionView::Table {
                headers: table_headers(items),
                rows: items,
            },
            Value::Array(items) => SectionView::List(items),
            primitive => SectionView::Primitive(cell_text(Some(primitive))),
        }
    }
}

fn table_headers(rows: &[Value]) -> Vec<&str> {
    let mut headers: Vec<&str> = Vec::new();
    for key in rows.iter().filter_map(Value::as_object).flat_map(|row| row.keys()) {
        if !headers.contains(&key.as_str()) {
            headers.push(key.as_str());
        }
    }
    headers
}

/// `order_number` → `Order number`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Text shown in a table cell. Missing and null values are blank, nested
/// structures are shown as compact JSON.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sections_keep_service_order() {
        let preview = PreviewData::new(json!({"zeta": 1, "alpha": 2, "order_lines": []}));
        let keys: Vec<&str> = preview.sections().iter().map(|s| s.key).collect();
        assert_eq!(keys, ["zeta", "alpha", "order_lines"]);
        assert_eq!(preview.sections()[2].title, "Order lines");
    }

    #[test]
    fn non_object_preview_is_a_single_result_section() {
        let preview = PreviewData::new(json!([1, 2]));
        let sections = preview.sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, RESULT_SECTION);
        assert_eq!(SectionView::of(sections[0].value), SectionView::List(&[json!(1), json!(2)]));
    }

    #[test]
    fn array_of_objects_becomes_a_table_with_union_headers() {
        let value = json!([{"sku": "A", "qty": 1}, {"sku": "B", "price": 2.5}]);
        match SectionView::of(&value) {
            SectionView::Table { headers, rows } => {
                assert_eq!(headers, ["sku", "qty", "price"]);
                assert_eq!(cell_text(rows[1].get("qty")), "");
                assert_eq!(cell_text(rows[1].get("price")), "2.5");
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn objects_become_key_value_rows_and_scalars_primitives() {
        let value = json!({"name": "ACME", "address": {"city": "Oslo"}});
        let SectionView::KeyValue(rows) = SectionView::of(&value) else {
            panic!("expected key/value rows");
        };
        assert_eq!(rows[0], ("name", &json!("ACME")));
        assert_eq!(cell_text(Some(rows[1].1)), r#"{"city":"Oslo"}"#);

        assert_eq!(SectionView::of(&json!(true)), SectionView::Primitive("true".into()));
        assert_eq!(SectionView::of(&json!([])), SectionView::Empty);
    }

    #[test]
    fn humanize_handles_empty_and_unicode_keys() {
        assert_eq!(humanize_key(""), "");
        assert_eq!(humanize_key("über_total"), "Über total");
    }
}
