//! Endpoint paths and wire types for the v5 log-database API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use logseek_core::types::SchemaField;

pub const LIST_REPOS: &str = "v5/repos";
pub const SCROLL: &str = "v5/scroll";

pub fn repo_path(name: &str) -> String {
    format!("v5/repos/{}", name)
}

pub fn search_path(name: &str) -> String {
    format!("v5/repos/{}/search", name)
}

pub fn histogram_path(name: &str) -> String {
    format!("v5/repos/{}/histogram", name)
}

/// One row of the repository listing as the service ships it.
#[derive(Debug, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub retention: String,
    #[serde(default, rename = "createTime")]
    pub create_time: String,
    #[serde(default, rename = "updateTime")]
    pub update_time: String,
}

#[derive(Debug, Deserialize)]
pub struct ListReposResponse {
    pub repos: Vec<RepoEntry>,
}

/// Response from getting a single repository. The name is not echoed
/// back; it comes from the request path.
#[derive(Debug, Deserialize)]
pub struct GetRepoResponse {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub retention: String,
    #[serde(default)]
    pub schema: Vec<SchemaField>,
}

/// Query string for a search request.
#[derive(Debug, Serialize)]
pub struct SearchQuery<'a> {
    pub q: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub sort: &'a str,
    pub from: usize,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total: usize,
    #[serde(default, rename = "partialSuccess")]
    pub partial_success: bool,
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub scroll_id: Option<String>,
}

/// Request body for continuing a scroll.
#[derive(Debug, Serialize)]
pub struct ScrollRequest<'a> {
    pub scroll_id: &'a str,
    pub scroll: &'a str,
}

/// Request body for a histogram query.
#[derive(Debug, Serialize)]
pub struct HistogramBody<'a> {
    pub query: &'a str,
    pub from: i64,
    pub to: i64,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub field: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct HistogramEntry {
    pub key: i64,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct HistogramResponse {
    pub total: usize,
    #[serde(default, rename = "partialSuccess")]
    pub partial_success: bool,
    #[serde(default)]
    pub buckets: Vec<HistogramEntry>,
}
