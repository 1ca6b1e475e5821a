// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Composition
//!
//! Turns sparse, optional search criteria into one boolean query.
//!
//! # Architecture
//!
//! ```text
//! SearchCriteria (field-rule table)
//!     ↓ compose(criteria, intent)
//! CompositeQuery { Must | Should, [Clause, ...] }
//!     ↓
//!     ├─→ ElasticsearchTranslator → bool query DSL
//!     └─→ InMemoryIndex → evaluated directly
//! ```
//!
//! # Field Rules
//!
//! ```text
//! Match              - free text (category, customer name)
//! Term               - exact token (gender), optionally case-insensitive
//! RangeFrom/RangeTo  - inclusive date/number bounds
//! Blended            - match + match_bool_prefix (+ term on a keyword field)
//! ```
//!
//! # Example
//!
//! ```rust
//! use doc_search::search::{compose, Combinator, OrderSearchCriteria, SearchIntent};
//!
//! let criteria = OrderSearchCriteria {
//!     category: Some("Men's Clothing".into()),
//!     gender: Some("male".into()),
//!     ..Default::default()
//! };
//! let query = compose(&criteria, SearchIntent::Filter);
//! assert_eq!(query.combinator(), Combinator::Must);
//! assert_eq!(query.clauses().len(), 2);
//! ```

mod composer;
mod criteria;
mod es_translator;
mod query_builder;

pub use composer::{compose, SearchIntent};
pub use criteria::{
    BlogSearchCriteria, CriterionValue, FieldRule, FieldSpec, OrderSearchCriteria, SearchCriteria,
};
pub use es_translator::ElasticsearchTranslator;
pub use query_builder::{
    Clause, ClauseKind, Combinator, CompositeQuery, QueryBuilder, RangeBound, TermValue,
};
