// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Builder - clause data and boolean composition
//!
//! Clauses are plain values built eagerly. Index adapters (see
//! [`super::ElasticsearchTranslator`] and [`crate::index::InMemoryIndex`])
//! turn them into whatever the underlying engine understands.
//!
//! # Example
//!
//! ```rust
//! use doc_search::search::{Clause, Combinator, QueryBuilder};
//!
//! // Single clause
//! let clause = Clause::term("customer_gender", "MALE");
//!
//! // Several constraints, all required
//! let query = QueryBuilder::new()
//!     .matches("category", "Men's Clothing")
//!     .clause(clause)
//!     .build_must();
//! assert_eq!(query.combinator(), Combinator::Must);
//! assert_eq!(query.clauses().len(), 2);
//!
//! // Nothing added: match everything
//! let query = QueryBuilder::new().build_should();
//! assert!(query.is_match_all());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single leaf condition of a search query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// Matches every document
    MatchAll,
    /// Analyzed full-text match; any query token may match
    Match { field: String, query: String },
    /// All query tokens, adjacent and in order
    MatchPhrase { field: String, query: String },
    /// Leading tokens as terms, last token as a prefix
    MatchBoolPrefix { field: String, query: String },
    /// Exact value on a non-analyzed field
    Term {
        field: String,
        value: TermValue,
        case_insensitive: bool,
    },
    /// Exact value from a set (OR semantics)
    Terms { field: String, values: Vec<String> },
    /// Inclusive bounds; a missing bound is unconstrained
    Range {
        field: String,
        gte: Option<RangeBound>,
        lte: Option<RangeBound>,
    },
    /// Value starts with the given prefix
    Prefix { field: String, value: String },
    /// Glob pattern: `*` any run, `?` any single character
    Wildcard { field: String, pattern: String },
    /// Within `fuzziness` edits (Levenshtein)
    Fuzzy {
        field: String,
        value: String,
        fuzziness: u8,
    },
}

impl Clause {
    /// Full-text match: `field` contains any token of `query`
    pub fn match_text(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            query: query.into(),
        }
    }

    /// Phrase match: tokens adjacent and in order
    pub fn match_phrase(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::MatchPhrase {
            field: field.into(),
            query: query.into(),
        }
    }

    /// Search-as-you-type match: last token treated as a prefix
    pub fn match_bool_prefix(field: impl Into<String>, query: impl Into<String>) -> Self {
        Self::MatchBoolPrefix {
            field: field.into(),
            query: query.into(),
        }
    }

    /// Exact, case-sensitive term
    pub fn term(field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
            case_insensitive: false,
        }
    }

    /// Exact term ignoring case
    pub fn term_ci(field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        Self::Term {
            field: field.into(),
            value: value.into(),
            case_insensitive: true,
        }
    }

    /// Any of several exact terms
    pub fn terms<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Inclusive range: `gte <= field <= lte`
    pub fn range(
        field: impl Into<String>,
        gte: Option<RangeBound>,
        lte: Option<RangeBound>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            gte,
            lte,
        }
    }

    /// Prefix match
    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Prefix {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Wildcard match
    pub fn wildcard(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Wildcard {
            field: field.into(),
            pattern: pattern.into(),
        }
    }

    /// Fuzzy match within `fuzziness` edits
    pub fn fuzzy(field: impl Into<String>, value: impl Into<String>, fuzziness: u8) -> Self {
        Self::Fuzzy {
            field: field.into(),
            value: value.into(),
            fuzziness,
        }
    }

    /// The kind tag of this clause
    pub fn kind(&self) -> ClauseKind {
        match self {
            Self::MatchAll => ClauseKind::MatchAll,
            Self::Match { .. } => ClauseKind::Match,
            Self::MatchPhrase { .. } => ClauseKind::MatchPhrase,
            Self::MatchBoolPrefix { .. } => ClauseKind::MatchBoolPrefix,
            Self::Term { .. } => ClauseKind::Term,
            Self::Terms { .. } => ClauseKind::Terms,
            Self::Range { .. } => ClauseKind::Range,
            Self::Prefix { .. } => ClauseKind::Prefix,
            Self::Wildcard { .. } => ClauseKind::Wildcard,
            Self::Fuzzy { .. } => ClauseKind::Fuzzy,
        }
    }

    /// Target field, `None` for [`Clause::MatchAll`]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MatchAll => None,
            Self::Match { field, .. }
            | Self::MatchPhrase { field, .. }
            | Self::MatchBoolPrefix { field, .. }
            | Self::Term { field, .. }
            | Self::Terms { field, .. }
            | Self::Range { field, .. }
            | Self::Prefix { field, .. }
            | Self::Wildcard { field, .. }
            | Self::Fuzzy { field, .. } => Some(field.as_str()),
        }
    }
}

/// Clause kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    MatchAll,
    Match,
    MatchPhrase,
    MatchBoolPrefix,
    Term,
    Terms,
    Range,
    Prefix,
    Wildcard,
    Fuzzy,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MatchAll => "match_all",
            Self::Match => "match",
            Self::MatchPhrase => "match_phrase",
            Self::MatchBoolPrefix => "match_bool_prefix",
            Self::Term => "term",
            Self::Terms => "terms",
            Self::Range => "range",
            Self::Prefix => "prefix",
            Self::Wildcard => "wildcard",
            Self::Fuzzy => "fuzzy",
        };
        f.write_str(name)
    }
}

/// Term value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TermValue {
    Text(String),
    Numeric(f64),
    Boolean(bool),
}

impl From<&str> for TermValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TermValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for TermValue {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<i64> for TermValue {
    fn from(value: i64) -> Self {
        Self::Numeric(value as f64)
    }
}

impl From<bool> for TermValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// One side of a range clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeBound {
    Numeric(f64),
    Date(DateTime<Utc>),
}

impl From<f64> for RangeBound {
    fn from(value: f64) -> Self {
        Self::Numeric(value)
    }
}

impl From<DateTime<Utc>> for RangeBound {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

/// How the clauses of a [`CompositeQuery`] combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combinator {
    /// Every clause must hold (AND)
    Must,
    /// At least one clause should hold (OR)
    Should,
}

/// Boolean combination of clauses.
///
/// Never empty: building from zero clauses yields a single
/// [`Clause::MatchAll`]. Engines disagree on what an empty `must`/`should`
/// list means, so one is never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CompositeQueryParts")]
pub struct CompositeQuery {
    combinator: Combinator,
    clauses: Vec<Clause>,
}

/// Wire shape of [`CompositeQuery`]; decoding goes through [`CompositeQuery::new`]
#[derive(Deserialize)]
struct CompositeQueryParts {
    combinator: Combinator,
    #[serde(default)]
    clauses: Vec<Clause>,
}

impl From<CompositeQueryParts> for CompositeQuery {
    fn from(parts: CompositeQueryParts) -> Self {
        Self::new(parts.combinator, parts.clauses)
    }
}

impl CompositeQuery {
    /// Combine clauses; an empty list becomes match-all
    pub fn new(combinator: Combinator, clauses: Vec<Clause>) -> Self {
        let clauses = if clauses.is_empty() {
            vec![Clause::MatchAll]
        } else {
            clauses
        };
        Self {
            combinator,
            clauses,
        }
    }

    /// A query holding one clause
    pub fn single(clause: Clause) -> Self {
        Self::new(Combinator::Must, vec![clause])
    }

    /// Match every document
    pub fn match_all() -> Self {
        Self::single(Clause::MatchAll)
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// True when the query is exactly one match-all clause
    pub fn is_match_all(&self) -> bool {
        matches!(self.clauses.as_slice(), [Clause::MatchAll])
    }
}

/// Builder for composite queries
#[derive(Debug, Default)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
}

impl QueryBuilder {
    /// Create a new query builder
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Add any clause
    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Add several clauses in order
    pub fn clauses(mut self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.clauses.extend(clauses);
        self
    }

    /// Add a full-text match constraint
    pub fn matches(self, field: impl Into<String>, query: impl Into<String>) -> Self {
        self.clause(Clause::match_text(field, query))
    }

    /// Add an exact term constraint
    pub fn term(self, field: impl Into<String>, value: impl Into<TermValue>) -> Self {
        self.clause(Clause::term(field, value))
    }

    /// Add an inclusive range constraint
    pub fn range(
        self,
        field: impl Into<String>,
        gte: Option<RangeBound>,
        lte: Option<RangeBound>,
    ) -> Self {
        self.clause(Clause::range(field, gte, lte))
    }

    /// Add a prefix constraint
    pub fn prefix(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.clause(Clause::prefix(field, value))
    }

    /// Number of clauses added so far
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Build with the given combinator
    pub fn build(self, combinator: Combinator) -> CompositeQuery {
        CompositeQuery::new(combinator, self.clauses)
    }

    /// Build query with AND semantics (all constraints must match)
    pub fn build_must(self) -> CompositeQuery {
        self.build(Combinator::Must)
    }

    /// Build query with OR semantics (any constraint can match)
    pub fn build_should(self) -> CompositeQuery {
        self.build(Combinator::Should)
    }
}
