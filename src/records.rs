// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Domain records stored in the index.
//!
//! The id of a record is assigned by the index and lives in the hit
//! envelope, not in the stored body. Records never serialize their id, and
//! an `id` field found in a body is ignored, whatever its type.
//!
//! # Example
//!
//! ```
//! use doc_search::{BlogPost, Identified};
//!
//! let mut post = BlogPost::new("Hello", "First post", ["rust", "search"]);
//! assert!(post.id().is_empty());
//!
//! post.set_id("abc123".to_string());
//! assert_eq!(post.id(), "abc123");
//!
//! let body = serde_json::to_value(&post).unwrap();
//! assert!(body.get("id").is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::executor::Identified;

/// An e-commerce order, as stored in the sample e-commerce index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip)]
    pub id: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_full_name: String,
    #[serde(default)]
    pub category: Vec<String>,
    pub order_id: i64,
    pub order_date: DateTime<Utc>,
    pub taxful_total_price: f64,
    #[serde(default, rename = "customer_gender")]
    pub gender: Option<String>,
}

impl Order {
    /// Categories joined for display
    pub fn category_label(&self) -> String {
        self.category.join(",")
    }
}

impl Identified for Order {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// A new post by a fresh author id, created now
    pub fn new<I, S>(title: impl Into<String>, content: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: String::new(),
            title: title.into(),
            content: content.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            user_id: Uuid::new_v4(),
            created: Utc::now(),
        }
    }
}

impl Identified for BlogPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
