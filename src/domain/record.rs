//! Row access abstraction.
//!
//! The engine treats rows as opaque keyed records. It never mutates them and
//! only reads the fields named by column keys, through the [`Record`] trait.

use super::value::CellValue;
use std::collections::{BTreeMap, HashMap};

/// A keyed record the table can read fields from.
///
/// Returning `None` means the field is missing from this row. Missing fields
/// render as empty cells, never match a non-empty filter and sort below every
/// present value.
pub trait Record {
    /// Reads the field named `key`.
    fn field(&self, key: &str) -> Option<CellValue>;
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).map(CellValue::from)
    }
}

impl Record for serde_json::Value {
    /// Reads a field from a JSON object. Non-object values have no fields.
    fn field(&self, key: &str) -> Option<CellValue> {
        self.as_object().and_then(|map| map.field(key))
    }
}

impl Record for HashMap<String, CellValue> {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).cloned()
    }
}

impl Record for BTreeMap<String, CellValue> {
    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).cloned()
    }
}

/// Parses a JSON document into rows.
///
/// The document must be an array whose items are all objects.
///
/// # Errors
///
/// Returns [`TableError::Json`](super::TableError::Json) on malformed JSON and
/// [`TableError::Rows`](super::TableError::Rows) when the document is not an
/// array of objects.
pub fn rows_from_json(json: &str) -> super::Result<Vec<serde_json::Value>> {
    let document: serde_json::Value = serde_json::from_str(json)?;

    let serde_json::Value::Array(items) = document else {
        return Err(super::TableError::Rows(
            "expected a JSON array of objects".to_string(),
        ));
    };

    if let Some(position) = items.iter().position(|item| !item.is_object()) {
        return Err(super::TableError::Rows(format!(
            "item {position} is not an object"
        )));
    }

    tracing::debug!(row_count = items.len(), "rows parsed");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_value_fields() {
        let row = json!({"id": 1, "name": "Bea", "note": null});
        assert_eq!(row.field("id"), Some(CellValue::Int(1)));
        assert_eq!(row.field("name"), Some(CellValue::from("Bea")));
        assert_eq!(row.field("note"), Some(CellValue::Null));
        assert_eq!(row.field("missing"), None);
        assert_eq!(json!(3).field("id"), None);
    }

    #[test]
    fn test_map_fields() {
        let mut row = HashMap::new();
        row.insert("name".to_string(), CellValue::from("Al"));
        assert_eq!(row.field("name"), Some(CellValue::from("Al")));
        assert_eq!(row.field("id"), None);
    }

    #[test]
    fn test_rows_from_json_accepts_array_of_objects() {
        let rows = rows_from_json(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_rows_from_json_rejects_other_shapes() {
        assert!(matches!(
            rows_from_json(r#"{"id": 1}"#),
            Err(crate::TableError::Rows(_))
        ));
        assert!(matches!(
            rows_from_json(r#"[{"id": 1}, 2]"#),
            Err(crate::TableError::Rows(msg)) if msg.contains("item 1")
        ));
    }
}
