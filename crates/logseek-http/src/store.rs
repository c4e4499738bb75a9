//! HTTP-backed [`LogStore`] implementation.

use async_trait::async_trait;
use tracing::{debug, instrument};

use logseek_core::types::ServiceUrl;
use logseek_core::{
    Credentials, Error, HistogramBucket, HistogramRequest, HistogramResult, LogStore, QueryRequest,
    QueryResult, Record, RepoDescriptor, RepoSummary, Result, Retention,
};

use crate::client::HttpClient;
use crate::endpoints::*;

/// Keep-alive window sent when continuing a scroll.
const SCROLL_WINDOW: &str = "3m";

/// A network-backed log store.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: HttpClient,
}

impl HttpStore {
    /// Create a new store for the given endpoint and credentials.
    pub fn new(endpoint: ServiceUrl, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(endpoint, credentials)?,
        })
    }

    pub fn endpoint(&self) -> &ServiceUrl {
        self.client.base()
    }
}

fn decode_records(data: Vec<serde_json::Value>) -> Result<Vec<Record>> {
    data.into_iter()
        .map(|v| {
            serde_json::from_value(v).map_err(|e| Error::Transport {
                message: format!("malformed record in response: {}", e),
            })
        })
        .collect()
}

fn into_query_result(response: SearchResponse) -> Result<QueryResult> {
    Ok(QueryResult {
        total: response.total,
        partial_success: response.partial_success,
        records: decode_records(response.data)?,
        scroll_id: response.scroll_id,
    })
}

#[async_trait]
impl LogStore for HttpStore {
    #[instrument(skip(self))]
    async fn list_repos(&self) -> Result<Vec<RepoSummary>> {
        debug!("Listing repositories");
        let response: ListReposResponse = self.client.get(LIST_REPOS).await?;

        let mut repos: Vec<RepoSummary> = response
            .repos
            .into_iter()
            .map(|r| RepoSummary {
                name: r.name,
                region: r.region,
                retention: Retention(r.retention),
                created_at: r.create_time,
                updated_at: r.update_time,
            })
            .collect();
        repos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(repos)
    }

    #[instrument(skip(self))]
    async fn get_repo(&self, name: &str) -> Result<RepoDescriptor> {
        debug!("Describing repository");
        let response: GetRepoResponse =
            self.client.get(&repo_path(name)).await.map_err(|e| match e {
                Error::Remote(se) if se.status == 404 => Error::NotFound(name.to_string()),
                other => other,
            })?;

        Ok(RepoDescriptor {
            name: name.to_string(),
            region: response.region,
            retention: Retention(response.retention),
            schema: response.schema,
        })
    }

    #[instrument(skip(self, request), fields(repo = %request.repo))]
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult> {
        debug!(from = request.from, size = request.size, "Running search");
        let query = SearchQuery {
            q: &request.query,
            sort: &request.sort,
            from: request.from,
            size: request.size,
            scroll: request.scroll.as_deref(),
        };

        let response: SearchResponse = self
            .client
            .get_query(&search_path(&request.repo), &query)
            .await?;
        into_query_result(response)
    }

    #[instrument(skip(self, scroll_id))]
    async fn query_scroll(&self, scroll_id: &str) -> Result<QueryResult> {
        if scroll_id.is_empty() {
            return Err(Error::InvalidState("no active scroll token".to_string()));
        }
        debug!("Continuing scroll");
        let body = ScrollRequest {
            scroll_id,
            scroll: SCROLL_WINDOW,
        };

        let response: SearchResponse = self.client.post(SCROLL, &body).await?;
        into_query_result(response)
    }

    #[instrument(skip(self, request), fields(repo = %request.repo))]
    async fn query_histogram(&self, request: &HistogramRequest) -> Result<HistogramResult> {
        debug!("Running histogram query");
        let body = HistogramBody {
            query: &request.query,
            from: request.from_ms,
            to: request.to_ms,
            field: &request.field,
        };

        let response: HistogramResponse = self
            .client
            .post(&histogram_path(&request.repo), &body)
            .await?;

        Ok(HistogramResult {
            total: response.total,
            partial_success: response.partial_success,
            buckets: response
                .buckets
                .into_iter()
                .map(|b| HistogramBucket {
                    key_ms: b.key,
                    count: b.count,
                })
                .collect(),
        })
    }
}
