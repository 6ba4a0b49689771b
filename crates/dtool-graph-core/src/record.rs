//! Dataset records returned by the lookup server

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dataset description as returned by the lookup server's graph query.
///
/// Only the fields the lineage graph needs are typed. Everything else the
/// server sends (URIs, creators, timestamps, ...) is kept in `extra` so the
/// record can be written back out without losing information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Dataset UUID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Human-readable dataset name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parent dataset references, in the order the server lists them.
    ///
    /// Values are usually UUID strings, but nothing guarantees that.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Vec<Value>>,

    /// Remaining fields, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatasetRecord {
    /// Create a record with a uuid and a name
    pub fn new(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: Some(uuid.into()),
            name: Some(name.into()),
            derived_from: None,
            extra: Map::new(),
        }
    }

    /// Add parent references
    pub fn with_parents<I, V>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.derived_from = Some(parents.into_iter().map(Into::into).collect());
        self
    }

    /// Add an untyped field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Name for display, empty if the server sent none
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Parse a list of records from a JSON array
    pub fn list_from_str(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_server_record() {
        let json = r#"[{
            "uuid": "a2218059-5bd0-4690-b090-062faf08e046",
            "name": "simple_test_dataset",
            "creator_username": "jotelha",
            "derived_from": ["1a1f9fad-8589-413e-9602-5bbd66bfe675"],
            "frozen_at": 1604860720.736
        }]"#;

        let records = DatasetRecord::list_from_str(json).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.uuid.as_deref(), Some("a2218059-5bd0-4690-b090-062faf08e046"));
        assert_eq!(record.display_name(), "simple_test_dataset");
        assert_eq!(
            record.derived_from,
            Some(vec![json!("1a1f9fad-8589-413e-9602-5bbd66bfe675")])
        );
        assert_eq!(record.extra.get("creator_username"), Some(&json!("jotelha")));
        assert_eq!(record.extra.get("frozen_at"), Some(&json!(1604860720.736)));
    }

    #[test]
    fn missing_fields_are_tolerated() {
        let records = DatasetRecord::list_from_str(r#"[{"base_uri": "s3://bucket"}]"#).unwrap();

        assert_eq!(records[0].uuid, None);
        assert_eq!(records[0].display_name(), "");
        assert_eq!(records[0].derived_from, None);
    }

    #[test]
    fn non_string_parents_survive_parsing() {
        let records = DatasetRecord::list_from_str(
            r#"[{"uuid": "x", "name": "x", "derived_from": [42, null, "abc"]}]"#,
        )
        .unwrap();

        assert_eq!(
            records[0].derived_from,
            Some(vec![json!(42), Value::Null, json!("abc")])
        );
    }

    #[test]
    fn extra_fields_are_written_back() {
        let record = DatasetRecord::new("u", "n").with_field("type", "dataset");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value, json!({"uuid": "u", "name": "n", "type": "dataset"}));
    }
}
