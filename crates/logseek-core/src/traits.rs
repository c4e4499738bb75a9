//! The LogStore trait.

use async_trait::async_trait;

use crate::types::{
    HistogramRequest, HistogramResult, QueryRequest, QueryResult, RepoDescriptor, RepoSummary,
};
use crate::Result;

/// A log-database backend.
///
/// Operations run one request to completion; there are no retries. Paging
/// is driven by the caller (see [`crate::Pager`]).
#[async_trait]
pub trait LogStore: Send + Sync {
    /// List all repositories visible to the credentials, sorted by name.
    async fn list_repos(&self) -> Result<Vec<RepoSummary>>;

    /// Describe a repository: region, retention and schema.
    ///
    /// Fails with [`crate::Error::NotFound`] when the name is unknown.
    async fn get_repo(&self, name: &str) -> Result<RepoDescriptor>;

    /// Run one search request and return a single page.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult>;

    /// Continue a scroll sequence with the token from the prior page.
    ///
    /// Fails with [`crate::Error::InvalidState`] when there is no active
    /// token.
    async fn query_scroll(&self, scroll_id: &str) -> Result<QueryResult>;

    /// Compute a log-count histogram over a time window.
    async fn query_histogram(&self, request: &HistogramRequest) -> Result<HistogramResult>;
}
