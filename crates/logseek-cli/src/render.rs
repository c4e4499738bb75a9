//! Record formatting.
//!
//! Two layouts: one record per line with a caller-chosen separator, and
//! a verbose one-field-per-line layout with right-aligned labels.

use colored::Colorize;

use logseek_core::{FieldValue, Record, SchemaField};

/// Resolve a comma-separated field spec against the schema.
///
/// `*` expands to every schema field in schema order; unknown names are
/// dropped silently.
pub fn select_fields(spec: &str, schema: &[SchemaField]) -> Vec<String> {
    let mut out = Vec::new();
    for item in spec.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if item == "*" {
            for field in schema {
                if !out.contains(&field.key) {
                    out.push(field.key.clone());
                }
            }
        } else if schema.iter().any(|f| f.key == item) && !out.iter().any(|k| k == item) {
            out.push(item.to_string());
        }
    }
    out
}

/// Render one value for display. Absent and null both render empty;
/// numbers lose their JSON float tail.
pub fn render_value(value: Option<&FieldValue>) -> String {
    match value {
        None | Some(FieldValue::Null) => String::new(),
        Some(FieldValue::Bool(b)) => b.to_string(),
        Some(FieldValue::Number(n)) => format!("{:.0}", n),
        Some(FieldValue::Text(s)) => s.clone(),
    }
}

/// Collapse CR/LF sequences so a record stays on one line.
pub fn escape_one_line(s: &str) -> String {
    s.replace("\r\n", "\\n").replace('\n', "\\n").replace('\r', "\\n")
}

/// One record on one line, optionally prefixed with a row index.
pub fn format_line(record: &Record, fields: &[String], separator: &str, index: Option<usize>) -> String {
    let mut parts = Vec::with_capacity(fields.len() + 1);
    if let Some(i) = index {
        parts.push(i.to_string());
    }
    for field in fields {
        parts.push(escape_one_line(&render_value(record.get(field))));
    }
    parts.join(separator)
}

/// One field per line with a red right-aligned label.
pub fn format_verbose(record: &Record, fields: &[String]) -> String {
    let width = fields.iter().map(|f| f.len()).max().unwrap_or(0);
    let mut out = String::new();
    for field in fields {
        let label = format!("{:>width$}", field).red();
        let value = render_value(record.get(field));
        out.push_str(&format!("{}: {}\n", label, value));
    }
    out
}
