//! Record values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single field value as transported by the service.
///
/// The service ships every numeric type as a generic floating-point JSON
/// number; interpretation is deferred to display. Tagged explicitly so
/// formatting rules can match on the variant instead of inspecting a raw
/// JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// One log record: a mapping from field name to value.
///
/// No schema is enforced on read; lookups for absent fields return `None`
/// and display layers treat that as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_mixed_value_types() {
        let record: Record = serde_json::from_str(
            r#"{"status": 200.0, "path": "/index.html", "cached": true, "referer": null}"#,
        )
        .unwrap();

        assert_eq!(record.get("status"), Some(&FieldValue::Number(200.0)));
        assert_eq!(record.get("path"), Some(&FieldValue::from("/index.html")));
        assert_eq!(record.get("cached"), Some(&FieldValue::Bool(true)));
        assert_eq!(record.get("referer"), Some(&FieldValue::Null));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn round_trips_through_json() {
        let mut record = Record::new();
        record.insert("status", FieldValue::Number(404.0));
        record.insert("path", FieldValue::from("/favicon.ico"));

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
