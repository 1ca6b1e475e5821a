// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Offset pagination arithmetic.

use std::ops::RangeInclusive;

use super::types::SearchError;

/// Offset/limit pair sent to the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Pages below 1 become 1
pub fn clamp_page(page: i64) -> u64 {
    u64::try_from(page).map_or(1, |page| page.max(1))
}

/// Offset/limit for a 1-based page.
///
/// No upper bound: a page past the end is a valid window that yields an
/// empty result.
pub fn window(page: i64, page_size: i64) -> Result<Window, SearchError> {
    let limit = u64::try_from(page_size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| invalid_page_size(page_size))?;
    let page = clamp_page(page);
    let offset = (page - 1).checked_mul(limit).ok_or_else(|| {
        SearchError::InvalidArgument(format!(
            "page {page} with page size {limit} overflows the offset"
        ))
    })?;
    Ok(Window { offset, limit })
}

/// Pages needed to show `total` hits, `page_size` at a time
pub fn link_count(total: u64, page_size: u64) -> Result<u64, SearchError> {
    if page_size == 0 {
        return Err(invalid_page_size(0));
    }
    Ok(if total % page_size == 0 {
        total / page_size
    } else {
        total / page_size + 1
    })
}

/// Page links around `page`: up to `radius` on each side, within
/// `1..=link_count`. Empty when there are no pages.
pub fn link_window(page: u64, link_count: u64, radius: u64) -> RangeInclusive<u64> {
    let start = if page <= radius { 1 } else { page - radius };
    let end = page.saturating_add(radius).min(link_count);
    start..=end
}

fn invalid_page_size(page_size: i64) -> SearchError {
    SearchError::InvalidArgument(format!("page size must be positive, got {page_size}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        assert_eq!(window(1, 10).unwrap(), Window { offset: 0, limit: 10 });
    }

    #[test]
    fn test_third_page() {
        assert_eq!(window(3, 10).unwrap(), Window { offset: 20, limit: 10 });
    }

    #[test]
    fn test_non_positive_page_is_first() {
        assert_eq!(window(0, 10).unwrap(), window(1, 10).unwrap());
        assert_eq!(window(-7, 10).unwrap(), window(1, 10).unwrap());
        assert_eq!(window(i64::MIN, 3).unwrap(), window(1, 3).unwrap());
    }

    #[test]
    fn test_far_page_is_allowed() {
        assert_eq!(window(1_000_000, 10).unwrap().offset, 9_999_990);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(matches!(window(1, 0), Err(SearchError::InvalidArgument(_))));
        assert!(matches!(window(1, -1), Err(SearchError::InvalidArgument(_))));
        assert!(matches!(link_count(10, 0), Err(SearchError::InvalidArgument(_))));
    }

    #[test]
    fn test_offset_overflow_rejected() {
        assert!(matches!(
            window(i64::MAX, i64::MAX),
            Err(SearchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_link_count() {
        assert_eq!(link_count(0, 10).unwrap(), 0);
        assert_eq!(link_count(10, 10).unwrap(), 1);
        assert_eq!(link_count(11, 10).unwrap(), 2);
        assert_eq!(link_count(25, 10).unwrap(), 3);
    }

    #[test]
    fn test_link_window_near_start() {
        assert_eq!(link_window(1, 20, 6), 1..=7);
        assert_eq!(link_window(6, 20, 6), 1..=12);
        assert_eq!(link_window(7, 20, 6), 1..=13);
    }

    #[test]
    fn test_link_window_near_end() {
        assert_eq!(link_window(18, 20, 6), 12..=20);
    }

    #[test]
    fn test_link_window_no_pages() {
        assert!(link_window(1, 0, 6).is_empty());
    }
}
