//! End-to-end search tests against the in-memory index.
//!
//! Each test seeds its own `InMemoryIndex`, so they run in parallel safely.
//!
//! Run with: `cargo test --test search_flow`

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use metrics_util::debugging::{DebugValue, DebuggingRecorder};
use serde_json::{json, Value};

use doc_search::{
    BlogPost, BlogSearchCriteria, Clause, CompositeQuery, IndexClient, InMemoryIndex, Order,
    OrderSearchCriteria, PageRequest, SearchConfig, SearchError, SearchExecutor, SearchIntent,
    Sort,
};

// =============================================================================
// Fixtures
// =============================================================================

fn order(first: &str, last: &str, category: &str, day: u32, price: f64, gender: &str) -> Value {
    json!({
        "customer_first_name": first,
        "customer_last_name": last,
        "customer_full_name": format!("{first} {last}"),
        "category": [category],
        "order_id": 500_000 + i64::from(day),
        "order_date": format!("2024-03-{day:02}T10:00:00+00:00"),
        "taxful_total_price": price,
        "customer_gender": gender
    })
}

/// 25 men's clothing orders, 5 women's shoes orders
async fn seeded_orders(config: &SearchConfig) -> Arc<InMemoryIndex> {
    let index = Arc::new(InMemoryIndex::new());
    for i in 0..25u32 {
        index
            .index(
                &config.order_index,
                order("Eddie", "Underwood", "Men's Clothing", 1 + i, 10.0 + f64::from(i), "MALE"),
            )
            .await
            .unwrap();
    }
    for i in 0..5u32 {
        index
            .index(
                &config.order_index,
                order("Mary", "Bailey", "Women's Shoes", 1 + i, 50.0, "FEMALE"),
            )
            .await
            .unwrap();
    }
    index
}

async fn seeded_blogs(config: &SearchConfig) -> Arc<InMemoryIndex> {
    let index = Arc::new(InMemoryIndex::new());
    let posts = [
        BlogPost::new("Meetup", "John gave a talk on indexing", Vec::<String>::new()),
        BlogPost::new("Guest post", "Notes from a guest author", ["John"]),
        BlogPost::new("Recap", "Johnny wrote the recap", ["events"]),
        BlogPost::new("Release", "Version two is out", ["release"]),
    ];
    for post in &posts {
        index
            .index(&config.blog_index, serde_json::to_value(post).unwrap())
            .await
            .unwrap();
    }
    index
}

fn mens_clothing() -> OrderSearchCriteria {
    OrderSearchCriteria {
        category: Some("Men's Clothing".into()),
        ..Default::default()
    }
}

// =============================================================================
// Filter searches
// =============================================================================

#[tokio::test]
async fn test_filter_by_category_pages_results() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let page = exec
        .search::<Order, _>(&mens_clothing(), SearchIntent::Filter, PageRequest::new(1, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_count, 25);
    assert_eq!(page.page_link_count, 3);
    assert_eq!(page.records.len(), 10);
    assert!(page.records.iter().all(|o| o.category_label() == "Men's Clothing"));
    assert!(page.records.iter().all(|o| !o.id.is_empty()));
}

#[tokio::test]
async fn test_last_partial_page() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let page = exec
        .search::<Order, _>(&mens_clothing(), SearchIntent::Filter, PageRequest::new(3, 10).unwrap())
        .await
        .unwrap();

    assert_eq!(page.records.len(), 5);
    assert_eq!(page.page, 3);
}

#[tokio::test]
async fn test_page_past_end_is_empty_not_error() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let page = exec
        .search::<Order, _>(&mens_clothing(), SearchIntent::Filter, PageRequest::new(10, 10).unwrap())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_count, 25);
    assert_eq!(page.page_link_count, 3);
}

#[tokio::test]
async fn test_no_criteria_returns_everything() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let page = exec
        .search::<Order, _>(
            &OrderSearchCriteria::default(),
            SearchIntent::Filter,
            PageRequest::with_defaults(None, None, &config).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(page.total_count, 30);
    assert_eq!(page.records.len(), 10);
}

#[tokio::test]
async fn test_blank_criteria_count_as_absent() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let criteria = OrderSearchCriteria {
        category: Some("   ".into()),
        customer_full_name: Some(String::new()),
        ..Default::default()
    };
    let page = exec
        .search::<Order, _>(&criteria, SearchIntent::Filter, PageRequest::new(1, 50).unwrap())
        .await
        .unwrap();

    assert_eq!(page.total_count, 30);
}

#[tokio::test]
async fn test_gender_and_date_range_combine() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let criteria = OrderSearchCriteria {
        gender: Some("female".into()),
        order_date_start: Some(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()),
        order_date_end: Some(Utc.with_ymd_and_hms(2024, 3, 4, 23, 59, 59).unwrap()),
        ..Default::default()
    };
    let page = exec
        .search::<Order, _>(&criteria, SearchIntent::Filter, PageRequest::new(1, 10).unwrap())
        .await
        .unwrap();

    // Days 2, 3 and 4 of the five women's orders
    assert_eq!(page.total_count, 3);
    assert!(page.records.iter().all(|o| o.gender.as_deref() == Some("FEMALE")));
}

#[tokio::test]
async fn test_sorted_by_price_descending() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let page = exec
        .search_with_sort::<Order, _>(
            &mens_clothing(),
            SearchIntent::Filter,
            PageRequest::new(1, 3).unwrap(),
            Sort::desc("taxful_total_price"),
        )
        .await
        .unwrap();

    let prices: Vec<f64> = page.records.iter().map(|o| o.taxful_total_price).collect();
    assert_eq!(prices, vec![34.0, 33.0, 32.0]);
}

#[tokio::test]
async fn test_prebuilt_fuzzy_query() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::orders(seeded_orders(&config).await, &config);

    let query = CompositeQuery::single(Clause::fuzzy("customer_first_name", "Mari", 1));
    let page = exec
        .search_query::<Order>(query, PageRequest::new(1, 10).unwrap(), None)
        .await
        .unwrap();

    assert_eq!(page.total_count, 5);
    assert!(page.records.iter().all(|o| o.customer_first_name == "Mary"));
}

// =============================================================================
// Blended searches
// =============================================================================

#[tokio::test]
async fn test_blend_matches_any_strategy() {
    let config = SearchConfig::default();
    let exec = SearchExecutor::blogs(seeded_blogs(&config).await, &config);

    let page = exec
        .search::<BlogPost, _>(
            &BlogSearchCriteria::text("John"),
            SearchIntent::Blend,
            PageRequest::new(1, 10).unwrap(),
        )
        .await
        .unwrap();

    let titles: Vec<&str> = page.records.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Meetup", "Guest post", "Recap"]);
}

// =============================================================================
// Hydration and errors
// =============================================================================

#[tokio::test]
async fn test_hit_id_wins_over_body_id() {
    let config = SearchConfig::default();
    let index = Arc::new(InMemoryIndex::new());
    let mut body = order("Eddie", "Underwood", "Men's Clothing", 1, 10.0, "MALE");
    body["id"] = json!("stale-body-id");
    index.insert_with_id(&config.order_index, "real-id", body);
    index.insert_with_id(&config.order_index, "broken", json!({"order_id": "nope"}));

    let exec = SearchExecutor::orders(index, &config);
    let page = exec
        .search::<Order, _>(&OrderSearchCriteria::default(), SearchIntent::Filter, PageRequest::new(1, 10).unwrap())
        .await
        .unwrap();

    // The undecodable hit is skipped but still counted by the index
    assert_eq!(page.total_count, 2);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].id, "real-id");
}

#[tokio::test]
async fn test_unknown_index_is_query_execution() {
    let exec = SearchExecutor::new(Arc::new(InMemoryIndex::new()), "missing");

    let result = exec
        .search::<Order, _>(&mens_clothing(), SearchIntent::Filter, PageRequest::new(1, 10).unwrap())
        .await;

    match result {
        Err(SearchError::QueryExecution { index, .. }) => assert_eq!(index, "missing"),
        other => panic!("expected QueryExecution, got {other:?}"),
    }
}

// =============================================================================
// Metrics
// =============================================================================

#[test]
fn test_metrics_are_recorded() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let config = SearchConfig::default();

    metrics::with_local_recorder(&recorder, || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let index = seeded_orders(&config).await;
            index.insert_with_id(&config.order_index, "broken", json!({"order_id": "nope"}));
            let exec = SearchExecutor::orders(index, &config);

            exec.search::<Order, _>(&mens_clothing(), SearchIntent::Filter, PageRequest::new(1, 50).unwrap())
                .await
                .unwrap();
            exec.search::<Order, _>(
                &OrderSearchCriteria::default(),
                SearchIntent::Filter,
                PageRequest::new(1, 50).unwrap(),
            )
            .await
            .unwrap();
        });
    });

    let snapshot = snapshotter.snapshot().into_vec();
    let counter = |name: &str, label: (&str, &str)| -> u64 {
        snapshot
            .iter()
            .filter(|(key, _, _, _)| key.key().name() == name)
            .filter(|(key, _, _, _)| {
                key.key()
                    .labels()
                    .any(|l| l.key() == label.0 && l.value() == label.1)
            })
            .map(|(_, _, _, value)| match value {
                DebugValue::Counter(n) => *n,
                _ => 0,
            })
            .sum()
    };

    assert_eq!(counter("doc_search_queries_total", ("status", "success")), 2);
    assert_eq!(counter("doc_search_decode_skipped_total", ("reason", "decode_error")), 1);
    assert!(snapshot
        .iter()
        .any(|(key, _, _, _)| key.key().name() == "doc_search_query_seconds"));
}
