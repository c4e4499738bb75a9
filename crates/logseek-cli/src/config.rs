//! One-shot config file support.
//!
//! `--config <path>` points at a JSON file that overrides the stored
//! profile for a single invocation. Lines may carry `#` comments; a `#`
//! inside an open double-quoted string is literal.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Per-invocation overrides.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverride {
    #[serde(default)]
    pub ak: Option<String>,
    #[serde(default)]
    pub sk: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Load a config file, stripping `#` comments before parsing.
pub fn load(path: &Path) -> Result<ConfigOverride> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let stripped = strip_comments(&raw);
    serde_json::from_str(&stripped)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

/// Remove `#` comments outside of double-quoted strings.
///
/// Quote parity is tracked per line; a backslash makes the following
/// character literal wherever it appears.
fn strip_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        out.push_str(strip_line(line));
        out.push('\n');
    }
    out
}

fn strip_line(line: &str) -> &str {
    let mut in_quotes = false;
    let mut chars = line.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}
