// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Configuration for search executors.
//!
//! # Example
//!
//! ```
//! use doc_search::SearchConfig;
//!
//! // Minimal config (uses defaults)
//! let config = SearchConfig::default();
//! assert_eq!(config.default_page_size, 10);
//! assert_eq!(config.order_index, "kibana_sample_data_ecommerce");
//!
//! // Override what differs
//! let config = SearchConfig {
//!     blog_index: "blog-v2".into(),
//!     default_page_size: 25,
//!     ..Default::default()
//! };
//! ```

use serde::Deserialize;

/// Configuration for search executors.
///
/// All fields have defaults, so a partial JSON/TOML document deserializes.
/// Index names live here rather than in code: each executor is bound to one
/// index at construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Index holding e-commerce orders
    #[serde(default = "default_order_index")]
    pub order_index: String,

    /// Index holding blog posts
    #[serde(default = "default_blog_index")]
    pub blog_index: String,

    /// Page size used when the caller supplies none
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Page links shown on each side of the current page
    #[serde(default = "default_link_window_radius")]
    pub link_window_radius: u64,
}

fn default_order_index() -> String { "kibana_sample_data_ecommerce".to_string() }
fn default_blog_index() -> String { "blog".to_string() }
fn default_page_size() -> u32 { 10 }
fn default_link_window_radius() -> u64 { 6 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            order_index: default_order_index(),
            blog_index: default_blog_index(),
            default_page_size: default_page_size(),
            link_window_radius: default_link_window_radius(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"blog_index": "posts"}"#).unwrap();
        assert_eq!(config.blog_index, "posts");
        assert_eq!(config.order_index, "kibana_sample_data_ecommerce");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.link_window_radius, 6);
    }

    #[test]
    fn test_empty_config_equals_default() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }
}
