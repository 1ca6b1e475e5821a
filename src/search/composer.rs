// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query composition from sparse criteria.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::criteria::SearchCriteria;
use super::query_builder::{Combinator, CompositeQuery, QueryBuilder};

/// Whether a search filters or ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchIntent {
    /// Structured filtering: every supplied criterion must match
    #[default]
    Filter,
    /// Blended relevance search: any textual strategy may match.
    ///
    /// There is no hard `must`, so documents matching none of the clauses
    /// can still show up with a lower score.
    Blend,
}

impl SearchIntent {
    pub fn combinator(self) -> Combinator {
        match self {
            Self::Filter => Combinator::Must,
            Self::Blend => Combinator::Should,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Blend => "blend",
        }
    }
}

/// Build one composite query from the present fields of `criteria`.
///
/// Fields are visited in table order. Blank strings count as absent. When
/// nothing applies the result is a single match-all clause.
pub fn compose<C>(criteria: &C, intent: SearchIntent) -> CompositeQuery
where
    C: SearchCriteria + ?Sized,
{
    let mut builder = QueryBuilder::new();
    for (entry, value) in criteria.fields() {
        let Some(value) = value.and_then(|v| v.normalized()) else {
            continue;
        };
        builder = builder.clauses(entry.clauses(value));
    }

    trace!(intent = intent.as_str(), clauses = builder.len(), "Composed query");
    builder.build(intent.combinator())
}
