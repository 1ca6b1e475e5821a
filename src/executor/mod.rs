// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search Executor
//!
//! Runs one search end to end against a single bound index.
//!
//! # Architecture
//!
//! ```text
//! search(criteria, intent, page)
//!       │
//!       ├─→ compose(criteria, intent)      → CompositeQuery
//!       ├─→ page.window()                  → offset/limit
//!       │
//!       ├─→ IndexClient::search(request)
//!       │        │
//!       │        ├─→ Err?        QueryExecution (not retried)
//!       │        └─→ hits None?  NoDocuments
//!       │
//!       ├─→ hydrate(hits)                  → Vec<T> (bad hits skipped)
//!       └─→ link_count(total, page_size)   → PageResult<T>
//! ```
//!
//! The executor holds no mutable state: just its index name and a shared
//! client handle. Clones are cheap and concurrent searches are independent.

mod hydrator;
pub mod pager;
mod types;

pub use hydrator::{hydrate, Identified};
pub use pager::Window;
pub use types::{PageRequest, PageResult, SearchError};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::config::SearchConfig;
use crate::index::{IndexClient, SearchRequest, Sort};
use crate::metrics::{self, LatencyTimer};
use crate::search::{compose, CompositeQuery, SearchCriteria, SearchIntent};

/// Executes searches against one index.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use doc_search::{
///     InMemoryIndex, Order, OrderSearchCriteria, PageRequest, SearchConfig,
///     SearchExecutor, SearchIntent,
/// };
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SearchConfig::default();
/// let executor = SearchExecutor::orders(Arc::new(InMemoryIndex::new()), &config);
///
/// let criteria = OrderSearchCriteria {
///     category: Some("Men's Clothing".into()),
///     ..Default::default()
/// };
/// let page = executor
///     .search::<Order, _>(&criteria, SearchIntent::Filter, PageRequest::new(1, 10)?)
///     .await?;
/// println!("{} of {} orders", page.records.len(), page.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SearchExecutor {
    client: Arc<dyn IndexClient>,
    index_name: String,
}

impl std::fmt::Debug for SearchExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchExecutor")
            .field("index_name", &self.index_name)
            .finish_non_exhaustive()
    }
}

impl SearchExecutor {
    pub fn new(client: Arc<dyn IndexClient>, index_name: impl Into<String>) -> Self {
        Self {
            client,
            index_name: index_name.into(),
        }
    }

    /// Executor bound to the configured order index
    pub fn orders(client: Arc<dyn IndexClient>, config: &SearchConfig) -> Self {
        Self::new(client, config.order_index.clone())
    }

    /// Executor bound to the configured blog index
    pub fn blogs(client: Arc<dyn IndexClient>, config: &SearchConfig) -> Self {
        Self::new(client, config.blog_index.clone())
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Compose `criteria` under `intent` and fetch one page of records.
    ///
    /// # Errors
    ///
    /// - [`SearchError::QueryExecution`] when the index reports an invalid response
    /// - [`SearchError::NoDocuments`] when the response carries no hit collection
    #[instrument(
        skip(self, criteria, intent, page),
        fields(index = %self.index_name, intent = intent.as_str(), page = page.page())
    )]
    pub async fn search<T, C>(
        &self,
        criteria: &C,
        intent: SearchIntent,
        page: PageRequest,
    ) -> Result<PageResult<T>, SearchError>
    where
        T: DeserializeOwned + Identified,
        C: SearchCriteria + ?Sized,
    {
        let query = compose(criteria, intent);
        self.execute(query, intent.as_str(), page, None).await
    }

    /// Like [`search`](Self::search), ordered by one field
    #[instrument(
        skip(self, criteria, intent, page, sort),
        fields(index = %self.index_name, intent = intent.as_str(), sort = %sort.field)
    )]
    pub async fn search_with_sort<T, C>(
        &self,
        criteria: &C,
        intent: SearchIntent,
        page: PageRequest,
        sort: Sort,
    ) -> Result<PageResult<T>, SearchError>
    where
        T: DeserializeOwned + Identified,
        C: SearchCriteria + ?Sized,
    {
        let query = compose(criteria, intent);
        self.execute(query, intent.as_str(), page, Some(sort)).await
    }

    /// Run a prebuilt query, for shapes no criteria table produces
    /// (single term, wildcard, fuzzy and the like).
    #[instrument(skip(self, query, page, sort), fields(index = %self.index_name))]
    pub async fn search_query<T>(
        &self,
        query: CompositeQuery,
        page: PageRequest,
        sort: Option<Sort>,
    ) -> Result<PageResult<T>, SearchError>
    where
        T: DeserializeOwned + Identified,
    {
        self.execute(query, "query", page, sort).await
    }

    async fn execute<T>(
        &self,
        query: CompositeQuery,
        intent: &'static str,
        page: PageRequest,
        sort: Option<Sort>,
    ) -> Result<PageResult<T>, SearchError>
    where
        T: DeserializeOwned + Identified,
    {
        let Window { offset, limit } = page.window();
        debug!(
            offset,
            limit,
            combinator = ?query.combinator(),
            clauses = query.clauses().len(),
            "Executing search"
        );

        let request = SearchRequest {
            index: self.index_name.clone(),
            query,
            offset,
            limit,
            sort,
        };

        let response = {
            let _timer = LatencyTimer::new(self.index_name.as_str());
            self.client.search(&request).await
        };

        let response = match response {
            Ok(response) => response,
            Err(source) => {
                warn!(error = %source, "Search failed");
                metrics::record_search_query(&self.index_name, intent, "error");
                return Err(SearchError::QueryExecution {
                    index: self.index_name.clone(),
                    source,
                });
            }
        };

        let Some(hits) = response.hits else {
            warn!("Search returned no hit collection");
            metrics::record_search_query(&self.index_name, intent, "no_documents");
            return Err(SearchError::NoDocuments {
                index: self.index_name.clone(),
            });
        };

        let records: Vec<T> = hydrate(hits);
        let page_link_count = pager::link_count(response.total, page.page_size())?;

        metrics::record_search_query(&self.index_name, intent, "success");
        metrics::record_search_results(records.len());
        metrics::record_search_total_hits(response.total);
        info!(total = response.total, returned = records.len(), "Search complete");

        Ok(PageResult {
            records,
            total_count: response.total,
            page_link_count,
            page: page.page(),
            page_size: page.page_size(),
        })
    }
}
