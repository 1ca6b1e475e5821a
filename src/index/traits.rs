// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::search::CompositeQuery;

/// The index reported an invalid response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("Index transport error: {0}")]
    Transport(String),
    #[error("Index server error ({status}): {reason}")]
    Server { status: u16, reason: String },
    #[error("Malformed query: {0}")]
    MalformedQuery(String),
    #[error("Index '{0}' not found")]
    IndexNotFound(String),
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sort on a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }
}

/// One search call against an index
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: String,
    pub query: CompositeQuery,
    pub offset: u64,
    pub limit: u64,
    pub sort: Option<Sort>,
}

/// A raw hit: the index-assigned id and the stored body, if any
#[derive(Debug, Clone, PartialEq)]
pub struct RawHit {
    pub id: String,
    pub source: Option<Value>,
}

impl RawHit {
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source: Some(source),
        }
    }

    /// A hit whose body was not returned
    pub fn without_source(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: None,
        }
    }
}

/// A valid search response.
///
/// `hits` is `None` when the index sent no hit collection at all. That is
/// not the same as `Some(vec![])` with `total == 0`, which is a valid empty
/// result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResponse {
    pub hits: Option<Vec<RawHit>>,
    pub total: u64,
}

/// The document index this crate queries.
///
/// Retries, timeouts and transport belong to implementations; callers
/// treat any `Err` as a failed, invalid response.
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Run a composite query and return one window of hits plus the total
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, IndexError>;

    /// Store a document and return its assigned id
    async fn index(&self, index: &str, document: Value) -> Result<String, IndexError>;
}
