// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Index clients: the document store searches run against.

pub mod memory;
pub mod traits;

mod matcher;

pub use memory::InMemoryIndex;
pub use traits::{
    IndexClient, IndexError, RawHit, SearchRequest, SearchResponse, Sort, SortOrder,
};
