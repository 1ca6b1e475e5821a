// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Public types for the search executor.

use std::ops::RangeInclusive;

use serde::Serialize;
use thiserror::Error;

use super::pager::{self, Window};
use crate::config::SearchConfig;
use crate::index::IndexError;

/// Why a search call failed.
///
/// All variants reach the caller unchanged; nothing is retried here.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The index reported an invalid response
    #[error("Search on '{index}' failed: {source}")]
    QueryExecution {
        index: String,
        #[source]
        source: IndexError,
    },
    /// The index answered without a hit collection. A valid empty result
    /// never produces this.
    #[error("Search on '{index}' returned no hit collection")]
    NoDocuments { index: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A validated, 1-based page request.
///
/// # Example
///
/// ```
/// use doc_search::PageRequest;
///
/// let page = PageRequest::new(3, 10).unwrap();
/// assert_eq!(page.window().offset, 20);
///
/// // Pages below 1 are clamped
/// assert_eq!(PageRequest::new(-4, 10).unwrap().page(), 1);
///
/// // A page size of zero is rejected
/// assert!(PageRequest::new(1, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    page_size: u64,
    offset: u64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Result<Self, SearchError> {
        let Window { offset, limit } = pager::window(page, page_size)?;
        Ok(Self {
            page: pager::clamp_page(page),
            page_size: limit,
            offset,
        })
    }

    /// Page 1 of the given size
    pub fn first(page_size: i64) -> Result<Self, SearchError> {
        Self::new(1, page_size)
    }

    /// Fill what the caller left out: page 1, the configured page size
    pub fn with_defaults(
        page: Option<i64>,
        page_size: Option<i64>,
        config: &SearchConfig,
    ) -> Result<Self, SearchError> {
        Self::new(
            page.unwrap_or(1),
            page_size.unwrap_or_else(|| i64::from(config.default_page_size)),
        )
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Offset/limit sent to the index
    pub fn window(&self) -> Window {
        Window {
            offset: self.offset,
            limit: self.page_size,
        }
    }
}

/// One page of hydrated records plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub records: Vec<T>,
    /// Hits across all pages
    pub total_count: u64,
    /// Pages needed to show every hit
    pub page_link_count: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Page links to render around the current page
    pub fn link_window(&self, radius: u64) -> RangeInclusive<u64> {
        pager::link_window(self.page, self.page_link_count, radius)
    }

    /// Convert records, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            records: self.records.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_link_count: self.page_link_count,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
