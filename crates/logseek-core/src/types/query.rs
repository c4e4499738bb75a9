//! Query request/result types.

use super::value::Record;

/// One search request against a repository.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// Repository name.
    pub repo: String,
    /// Final filter string, including any date-range clause.
    pub query: String,
    /// Sort expression such as "timestamp:desc"; empty means service default.
    pub sort: String,
    /// Page offset (offset paging).
    pub from: usize,
    /// Requested page size.
    pub size: usize,
    /// Continuation window to request (e.g. "3m"); enables scroll paging.
    pub scroll: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// The service's best-effort total match count.
    pub total: usize,
    /// Set when the service could not scan everything within its time budget.
    pub partial_success: bool,
    /// Records in this page.
    pub records: Vec<Record>,
    /// Continuation token for the next scroll request, if any.
    pub scroll_id: Option<String>,
}

/// A histogram request over a time window.
#[derive(Debug, Clone)]
pub struct HistogramRequest {
    pub repo: String,
    pub query: String,
    /// Date-typed field the buckets are computed over.
    pub field: String,
    /// Window start, milliseconds since epoch.
    pub from_ms: i64,
    /// Window end, milliseconds since epoch.
    pub to_ms: i64,
}

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBucket {
    /// Bucket start, milliseconds since epoch.
    pub key_ms: i64,
    pub count: u64,
}

/// Histogram results.
#[derive(Debug, Clone, Default)]
pub struct HistogramResult {
    pub total: usize,
    pub partial_success: bool,
    pub buckets: Vec<HistogramBucket>,
}
