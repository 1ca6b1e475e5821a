// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use super::matcher::{compare_by_field, matches_query};
use super::traits::{IndexClient, IndexError, RawHit, SearchRequest, SearchResponse, SortOrder};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: String,
    source: Value,
}

/// In-process document index.
///
/// Documents keep insertion order; hits come back in that order unless the
/// request carries a sort. Searching an index that has never received a
/// document fails with [`IndexError::IndexNotFound`].
pub struct InMemoryIndex {
    indexes: DashMap<String, Vec<StoredDocument>>,
}

impl InMemoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self {
            indexes: DashMap::new(),
        }
    }

    /// Store a document under a caller-chosen id, replacing any existing one
    pub fn insert_with_id(&self, index: &str, id: impl Into<String>, document: Value) {
        let id = id.into();
        let mut documents = self.indexes.entry(index.to_string()).or_default();
        match documents.iter().position(|stored| stored.id == id) {
            Some(position) => documents[position].source = document,
            None => documents.push(StoredDocument { id, source: document }),
        }
    }

    /// Document count of one index
    #[must_use]
    pub fn len(&self, index: &str) -> usize {
        self.indexes.get(index).map_or(0, |documents| documents.len())
    }

    /// True when no index holds any document
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.iter().all(|entry| entry.value().is_empty())
    }

    /// Drop every index
    pub fn clear(&self) {
        self.indexes.clear();
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexClient for InMemoryIndex {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, IndexError> {
        let documents = self
            .indexes
            .get(&request.index)
            .ok_or_else(|| IndexError::IndexNotFound(request.index.clone()))?;

        let mut matched: Vec<&StoredDocument> = documents
            .iter()
            .filter(|stored| matches_query(&request.query, &stored.source))
            .collect();

        if let Some(sort) = &request.sort {
            let descending = sort.order == SortOrder::Desc;
            matched.sort_by(|a, b| compare_by_field(&a.source, &b.source, &sort.field, descending));
        }

        let total = matched.len() as u64;
        let offset = usize::try_from(request.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
        let hits = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|stored| RawHit::new(stored.id.clone(), stored.source.clone()))
            .collect();

        Ok(SearchResponse {
            hits: Some(hits),
            total,
        })
    }

    async fn index(&self, index: &str, document: Value) -> Result<String, IndexError> {
        if !document.is_object() {
            return Err(IndexError::MalformedQuery(
                "document body must be a JSON object".to_string(),
            ));
        }
        let id = Uuid::new_v4().simple().to_string();
        self.indexes
            .entry(index.to_string())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                source: document,
            });
        Ok(id)
    }
}
