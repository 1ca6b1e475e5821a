//! # Doc Search
//!
//! Composable, paginated document search over a search index.
//!
//! ## Architecture
//!
//! A search call flows through four small stages, each usable on its own:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Composer                            │
//! │  • Sparse criteria → one CompositeQuery                    │
//! │  • Filter → must, Blend → should, nothing → match_all      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                   (offset/limit from Pager)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Index Client                          │
//! │  • Async trait, bound to one index per executor            │
//! │  • InMemoryIndex, or any engine via a DSL translator       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                         (raw hits)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Hydrator                            │
//! │  • Decode each hit body, stamp the hit id                  │
//! │  • Missing or undecodable bodies are skipped               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                   PageResult { records, total_count, page_link_count }
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use doc_search::{
//!     BlogPost, BlogSearchCriteria, IndexClient, InMemoryIndex, PageRequest,
//!     SearchConfig, SearchExecutor, SearchIntent,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = SearchConfig::default();
//!     let index = Arc::new(InMemoryIndex::new());
//!
//!     let post = BlogPost::new("Welcome", "John says hello", ["intro"]);
//!     index
//!         .index(&config.blog_index, serde_json::to_value(&post).unwrap())
//!         .await
//!         .unwrap();
//!
//!     let blogs = SearchExecutor::blogs(index, &config);
//!     let page = blogs
//!         .search::<BlogPost, _>(
//!             &BlogSearchCriteria::text("John"),
//!             SearchIntent::Blend,
//!             PageRequest::with_defaults(None, None, &config).unwrap(),
//!         )
//!         .await
//!         .expect("search failed");
//!
//!     for post in &page.records {
//!         println!("{}: {}", post.id, post.title);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`search`]: Clauses, composite queries, criteria tables and the composer
//! - [`index`]: The [`IndexClient`] trait and the in-memory index
//! - [`executor`]: [`SearchExecutor`], pagination and hydration
//! - [`records`]: Order and blog post records
//! - [`metrics`]: `doc_search_*` counters and histograms

pub mod config;
pub mod executor;
pub mod index;
pub mod metrics;
pub mod records;
pub mod search;

pub use config::SearchConfig;
pub use executor::{
    hydrate, Identified, PageRequest, PageResult, SearchError, SearchExecutor, Window,
};
pub use index::{
    IndexClient, IndexError, InMemoryIndex, RawHit, SearchRequest, SearchResponse, Sort,
    SortOrder,
};
pub use records::{BlogPost, Order};
pub use search::{
    compose, BlogSearchCriteria, Clause, Combinator, CompositeQuery, ElasticsearchTranslator,
    OrderSearchCriteria, QueryBuilder, SearchCriteria, SearchIntent,
};
pub use metrics::LatencyTimer;
