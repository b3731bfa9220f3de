use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `key`/`value` pair extracted from a form-like region of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub value: String,
}

/// The document as returned by the remote parser.
///
/// The application never interprets `table_data`; it is displayed and passed
/// back unchanged to the mapping service as part of a
/// [`MapSchemaRequest`](crate::requests::MapSchemaRequest). `form_data` feeds
/// the "Form Data" tab and the CSV/XLSX exports, `raw_data` the "Raw Data" tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedData {
    #[serde(default)]
    pub table_data: Vec<Value>,
    #[serde(default)]
    pub form_data: Vec<FormField>,
    #[serde(default)]
    pub raw_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_sections_default_to_empty() {
        let parsed: ParsedData =
            serde_json::from_value(json!({"formData": [{"key": "Total", "value": "12"}]}))
                .unwrap();

        assert!(parsed.table_data.is_empty());
        assert_eq!(parsed.raw_data, "");
        assert_eq!(parsed.form_data[0].key, "Total");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let parsed = ParsedData {
            table_data: vec![json!({"sku": "A-1"})],
            form_data: vec![],
            raw_data: "text".into(),
        };
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({"tableData": [{"sku": "A-1"}], "formData": [], "rawData": "text"})
        );
    }
}
