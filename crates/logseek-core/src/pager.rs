//! Paging over multi-page query results.
//!
//! The service reports a best-effort `total` and a `partial_success`
//! flag; either can demand another page even when the current one looks
//! complete. The pager owns that loop so callers only consume pages.

use tracing::debug;

use crate::traits::LogStore;
use crate::types::{QueryRequest, QueryResult};
use crate::Result;

/// Hard ceiling on rows fetched by one paging run.
pub const MAX_ROWS: usize = 10_000;

/// How successive pages are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagingMode {
    /// Re-issue the query with an advancing `from` offset.
    Offset,
    /// Open a scroll with the given keep-alive window (e.g. "3m") and
    /// follow continuation tokens.
    Scroll(String),
}

/// Drives a query to completion one page at a time.
pub struct Pager<'a, S: LogStore + ?Sized> {
    store: &'a S,
    request: QueryRequest,
    mode: PagingMode,
    cap: usize,
    emitted: usize,
    total: usize,
    scroll_id: Option<String>,
    started: bool,
    done: bool,
}

impl<'a, S: LogStore + ?Sized> Pager<'a, S> {
    /// Set up a paging run. `head` bounds the total rows emitted; the
    /// hard ceiling of [`MAX_ROWS`] applies regardless.
    pub fn new(store: &'a S, mut request: QueryRequest, mode: PagingMode, head: Option<usize>) -> Self {
        if let PagingMode::Scroll(window) = &mode {
            request.scroll = Some(window.clone());
            request.from = 0;
        }
        let cap = head.map_or(MAX_ROWS, |h| h.min(MAX_ROWS));
        Self {
            store,
            request,
            mode,
            cap,
            emitted: 0,
            total: 0,
            scroll_id: None,
            started: false,
            done: false,
        }
    }

    /// The service's reported total after the most recent page.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Rows emitted so far across all pages.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Fetch the next page, or `None` when the run is complete.
    ///
    /// A page is never returned empty; an empty response ends the run
    /// even if the reported total claims more rows exist.
    pub async fn next_page(&mut self) -> Result<Option<QueryResult>> {
        if self.done {
            return Ok(None);
        }

        let mut page = if !self.started {
            self.started = true;
            self.store.query(&self.request).await?
        } else {
            match &self.mode {
                PagingMode::Offset => self.store.query(&self.request).await?,
                PagingMode::Scroll(_) => {
                    let Some(id) = self.scroll_id.as_deref().filter(|s| !s.is_empty()) else {
                        self.done = true;
                        return Ok(None);
                    };
                    self.store.query_scroll(id).await?
                }
            }
        };

        self.total = page.total;
        self.scroll_id = page.scroll_id.clone();

        let remaining = self.cap - self.emitted;
        if page.records.len() >= remaining {
            page.records.truncate(remaining);
            self.done = true;
        }
        self.emitted += page.records.len();
        self.request.from += page.records.len();

        if page.records.is_empty() {
            self.done = true;
            return Ok(None);
        }

        if !self.done {
            self.done = match &self.mode {
                PagingMode::Offset => {
                    !(page.partial_success || page.total > self.request.from)
                }
                PagingMode::Scroll(_) => {
                    self.emitted >= page.total
                        || self.scroll_id.as_deref().is_none_or(str::is_empty)
                }
            };
        }

        debug!(
            emitted = self.emitted,
            total = self.total,
            done = self.done,
            "fetched page"
        );
        Ok(Some(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FieldValue, HistogramRequest, HistogramResult, Record, RepoDescriptor, RepoSummary,
    };
    use crate::Error;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct FakeStore {
        pages: Mutex<VecDeque<QueryResult>>,
        query_offsets: Mutex<Vec<usize>>,
        query_scrolls: Mutex<Vec<Option<String>>>,
        scroll_tokens: Mutex<Vec<String>>,
    }

    impl FakeStore {
        fn with_pages(pages: Vec<QueryResult>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                query_offsets: Mutex::new(Vec::new()),
                query_scrolls: Mutex::new(Vec::new()),
                scroll_tokens: Mutex::new(Vec::new()),
            }
        }

        fn next(&self) -> Result<QueryResult> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::InvalidState("no more fake pages".to_string()))
        }
    }

    #[async_trait]
    impl LogStore for FakeStore {
        async fn list_repos(&self) -> Result<Vec<RepoSummary>> {
            Err(Error::InvalidState("unused".to_string()))
        }

        async fn get_repo(&self, name: &str) -> Result<RepoDescriptor> {
            Err(Error::NotFound(name.to_string()))
        }

        async fn query(&self, request: &QueryRequest) -> Result<QueryResult> {
            self.query_offsets.lock().unwrap().push(request.from);
            self.query_scrolls.lock().unwrap().push(request.scroll.clone());
            self.next()
        }

        async fn query_scroll(&self, scroll_id: &str) -> Result<QueryResult> {
            self.scroll_tokens.lock().unwrap().push(scroll_id.to_string());
            self.next()
        }

        async fn query_histogram(&self, _request: &HistogramRequest) -> Result<HistogramResult> {
            Err(Error::InvalidState("unused".to_string()))
        }
    }

    fn record(n: usize) -> Record {
        [("n".to_string(), FieldValue::Number(n as f64))]
            .into_iter()
            .collect()
    }

    fn page(total: usize, partial: bool, count: usize, scroll_id: Option<&str>) -> QueryResult {
        QueryResult {
            total,
            partial_success: partial,
            records: (0..count).map(record).collect(),
            scroll_id: scroll_id.map(str::to_string),
        }
    }

    fn request(size: usize) -> QueryRequest {
        QueryRequest {
            repo: "applogs".to_string(),
            query: "status:500".to_string(),
            sort: "timestamp:desc".to_string(),
            from: 0,
            size,
            scroll: None,
        }
    }

    #[tokio::test]
    async fn single_complete_page_stops() {
        let store = FakeStore::with_pages(vec![page(2, false, 2, None)]);
        let mut pager = Pager::new(&store, request(200), PagingMode::Offset, None);

        let first = pager.next_page().await.unwrap().unwrap();
        assert_eq!(first.records.len(), 2);
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(store.query_offsets.lock().unwrap().as_slice(), &[0]);
    }

    #[tokio::test]
    async fn offset_paging_advances_from() {
        let store = FakeStore::with_pages(vec![
            page(5, false, 2, None),
            page(5, false, 2, None),
            page(5, false, 1, None),
        ]);
        let mut pager = Pager::new(&store, request(2), PagingMode::Offset, None);

        let mut rows = 0;
        while let Some(p) = pager.next_page().await.unwrap() {
            rows += p.records.len();
        }
        assert_eq!(rows, 5);
        assert_eq!(pager.total(), 5);
        assert_eq!(store.query_offsets.lock().unwrap().as_slice(), &[0, 2, 4]);
    }

    #[tokio::test]
    async fn partial_success_forces_another_page() {
        // Total claims we are done but the scan was cut short.
        let store = FakeStore::with_pages(vec![
            page(2, true, 2, None),
            page(3, false, 1, None),
        ]);
        let mut pager = Pager::new(&store, request(2), PagingMode::Offset, None);

        let mut rows = 0;
        while let Some(p) = pager.next_page().await.unwrap() {
            rows += p.records.len();
        }
        assert_eq!(rows, 3);
        assert_eq!(store.query_offsets.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_page_ends_run_despite_total() {
        let store = FakeStore::with_pages(vec![page(100, false, 0, None)]);
        let mut pager = Pager::new(&store, request(200), PagingMode::Offset, None);

        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.total(), 100);
        assert_eq!(pager.emitted(), 0);
    }

    #[tokio::test]
    async fn head_truncates_final_page() {
        let store = FakeStore::with_pages(vec![
            page(10, false, 2, None),
            page(10, false, 2, None),
        ]);
        let mut pager = Pager::new(&store, request(2), PagingMode::Offset, Some(3));

        let first = pager.next_page().await.unwrap().unwrap();
        assert_eq!(first.records.len(), 2);
        let second = pager.next_page().await.unwrap().unwrap();
        assert_eq!(second.records.len(), 1);
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.emitted(), 3);
    }

    #[tokio::test]
    async fn scroll_follows_continuation_tokens() {
        let store = FakeStore::with_pages(vec![
            page(4, false, 2, Some("t1")),
            page(4, false, 2, Some("t2")),
        ]);
        let mode = PagingMode::Scroll("3m".to_string());
        let mut pager = Pager::new(&store, request(2000), mode, None);

        let mut rows = 0;
        while let Some(p) = pager.next_page().await.unwrap() {
            rows += p.records.len();
        }
        assert_eq!(rows, 4);
        // Opening request carries the scroll window; only the first token
        // is followed because the total is reached.
        assert_eq!(
            store.query_scrolls.lock().unwrap().as_slice(),
            &[Some("3m".to_string())]
        );
        assert_eq!(
            store.scroll_tokens.lock().unwrap().as_slice(),
            &["t1".to_string()]
        );
    }

    #[tokio::test]
    async fn scroll_stops_on_missing_token() {
        let store = FakeStore::with_pages(vec![page(10, false, 2, None)]);
        let mode = PagingMode::Scroll("3m".to_string());
        let mut pager = Pager::new(&store, request(2000), mode, None);

        assert!(pager.next_page().await.unwrap().is_some());
        assert!(pager.next_page().await.unwrap().is_none());
        assert!(store.scroll_tokens.lock().unwrap().is_empty());
    }
}
