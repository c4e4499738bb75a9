//! Repository descriptors and schemas.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One schema entry: a field name and its declared value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub key: String,
    /// Declared type string from the service ("date", "long", "string", ...).
    #[serde(rename = "valtype")]
    pub value_type: String,
}

impl SchemaField {
    pub fn new(key: impl Into<String>, value_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value_type: value_type.into(),
        }
    }

    pub fn is_date(&self) -> bool {
        self.value_type == "date"
    }
}

/// Service-enforced maximum age of queryable data.
///
/// Expressed by the service as a day count with a unit suffix ("30d");
/// `"-1"` or any non-digit-leading string means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Retention(pub String);

impl Retention {
    /// The bounded day count, or `None` for unlimited retention.
    pub fn days(&self) -> Option<u32> {
        let digits: String = self
            .0
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of the repository listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub region: String,
    pub retention: Retention,
    pub created_at: String,
    pub updated_at: String,
}

/// Full description of a repository: region, retention and schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoDescriptor {
    pub name: String,
    pub region: String,
    pub retention: Retention,
    pub schema: Vec<SchemaField>,
}

impl RepoDescriptor {
    /// The field that carries the record timestamp: the first schema entry
    /// declared as "date". `None` when the schema has no date-typed field.
    pub fn date_field(&self) -> Option<&str> {
        self.schema
            .iter()
            .find(|f| f.is_date())
            .map(|f| f.key.as_str())
    }

    /// Look up a schema field by exact key.
    pub fn field(&self, key: &str) -> Option<&SchemaField> {
        self.schema.iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(schema: Vec<SchemaField>) -> RepoDescriptor {
        RepoDescriptor {
            name: "applogs".to_string(),
            region: "z0".to_string(),
            retention: Retention("30d".to_string()),
            schema,
        }
    }

    #[test]
    fn retention_parses_leading_digit_run() {
        assert_eq!(Retention("30d".to_string()).days(), Some(30));
        assert_eq!(Retention("7".to_string()).days(), Some(7));
        assert_eq!(Retention("365days".to_string()).days(), Some(365));
    }

    #[test]
    fn retention_unlimited_forms() {
        assert_eq!(Retention("-1".to_string()).days(), None);
        assert_eq!(Retention("forever".to_string()).days(), None);
        assert_eq!(Retention(String::new()).days(), None);
    }

    #[test]
    fn first_date_field_wins() {
        let repo = descriptor(vec![
            SchemaField::new("status", "long"),
            SchemaField::new("timestamp", "date"),
            SchemaField::new("updated", "date"),
        ]);
        assert_eq!(repo.date_field(), Some("timestamp"));
    }

    #[test]
    fn no_date_field() {
        let repo = descriptor(vec![SchemaField::new("status", "long")]);
        assert_eq!(repo.date_field(), None);
    }
}
