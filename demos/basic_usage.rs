// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Basic doc-search usage example.
//!
//! Demonstrates:
//! 1. Seeding an in-memory index with orders and blog posts
//! 2. A filtered order search, paged
//! 3. A sorted search and a prebuilt fuzzy query
//! 4. A blended free-text blog search
//! 5. The Elasticsearch request body for a composed query
//! 6. Displaying captured metrics
//!
//! # Run
//!
//! ```bash
//! cargo run --example basic_usage
//! ```

use std::sync::Arc;

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use serde_json::json;

use doc_search::{
    compose, BlogPost, BlogSearchCriteria, Clause, CompositeQuery, ElasticsearchTranslator,
    IndexClient, InMemoryIndex, Order, OrderSearchCriteria, PageRequest, PageResult,
    SearchConfig, SearchExecutor, SearchIntent, SearchRequest, Sort,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install metrics recorder (captures all metrics for display at the end)
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder.install().expect("failed to install metrics recorder");

    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║             doc-search: Basic Usage Example                   ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    // ─────────────────────────────────────────────────────────────────────────
    // 1. Seed the index
    // ─────────────────────────────────────────────────────────────────────────
    let config = SearchConfig {
        default_page_size: 5,
        ..Default::default()
    };
    let index = Arc::new(InMemoryIndex::new());

    println!("📦 Seeding '{}' and '{}'...", config.order_index, config.blog_index);
    let customers = [
        ("Eddie", "Underwood", "Men's Clothing", "MALE"),
        ("Mary", "Bailey", "Women's Clothing", "FEMALE"),
        ("Gwen", "Butler", "Women's Shoes", "FEMALE"),
        ("Diane", "Chandler", "Women's Clothing", "FEMALE"),
        ("Oliver", "Rios", "Men's Shoes", "MALE"),
        ("Robbie", "Reyes", "Men's Clothing", "MALE"),
    ];
    for (n, (first, last, category, gender)) in customers.iter().cycle().take(24).enumerate() {
        index
            .index(
                &config.order_index,
                json!({
                    "customer_first_name": first,
                    "customer_last_name": last,
                    "customer_full_name": format!("{first} {last}"),
                    "category": [category],
                    "order_id": 584_000 + n,
                    "order_date": format!("2024-02-{:02}T09:28:48+00:00", 1 + n),
                    "taxful_total_price": 20.0 + (n as f64) * 3.5,
                    "customer_gender": gender,
                }),
            )
            .await?;
    }

    let posts = [
        BlogPost::new("Hello", "John opened the new office", ["news"]),
        BlogPost::new("Interview", "A chat about search relevance", ["John", "interview"]),
        BlogPost::new("Johnny's notes", "Johnny on pagination", ["notes"]),
        BlogPost::new("Changelog", "Release 2.0 is out", ["release"]),
    ];
    for post in &posts {
        index
            .index(&config.blog_index, serde_json::to_value(post)?)
            .await?;
    }
    println!("   ✓ {} orders, {} posts", index.len(&config.order_index), index.len(&config.blog_index));

    let orders = SearchExecutor::orders(index.clone(), &config);
    let blogs = SearchExecutor::blogs(index.clone(), &config);

    // ─────────────────────────────────────────────────────────────────────────
    // 2. Filtered search
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🔍 Women's clothing, page by page...");
    let criteria = OrderSearchCriteria {
        category: Some("Women's Clothing".into()),
        gender: Some("female".into()),
        ..Default::default()
    };
    for page in 1..=2 {
        let result = orders
            .search::<Order, _>(
                &criteria,
                SearchIntent::Filter,
                PageRequest::with_defaults(Some(page), None, &config)?,
            )
            .await?;
        print_orders(&result, config.link_window_radius);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 3. Sorted and prebuilt queries
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n💰 Men's orders, most expensive first...");
    let mens = OrderSearchCriteria {
        gender: Some("MALE".into()),
        ..Default::default()
    };
    let result = orders
        .search_with_sort::<Order, _>(
            &mens,
            SearchIntent::Filter,
            PageRequest::first(3)?,
            Sort::desc("taxful_total_price"),
        )
        .await?;
    print_orders(&result, config.link_window_radius);

    println!("\n🔤 Fuzzy first name 'Olivr'...");
    let query = CompositeQuery::single(Clause::fuzzy("customer_first_name", "Olivr", 1));
    let result = orders
        .search_query::<Order>(query, PageRequest::first(3)?, None)
        .await?;
    print_orders(&result, config.link_window_radius);

    // ─────────────────────────────────────────────────────────────────────────
    // 4. Blended search
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n📝 Blog posts about 'John'...");
    let text = BlogSearchCriteria::text("John");
    let result = blogs
        .search::<BlogPost, _>(&text, SearchIntent::Blend, PageRequest::first(10)?)
        .await?;
    for post in &result.records {
        println!("   • [{}] {} (tags: {})", post.id, post.title, post.tags.join(", "));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 5. What an Elasticsearch cluster would receive
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n🧾 Elasticsearch request body for the blended search:");
    let request = SearchRequest {
        index: config.blog_index.clone(),
        query: compose(&text, SearchIntent::Blend),
        offset: 0,
        limit: 10,
        sort: None,
    };
    let body = ElasticsearchTranslator::search_body(&request);
    for line in serde_json::to_string_pretty(&body)?.lines() {
        println!("   {line}");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // 6. Metrics
    // ─────────────────────────────────────────────────────────────────────────
    println!("\n📈 Raw Metrics:");
    dump_metrics(&snapshotter);

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║                      Example Complete!                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝\n");

    Ok(())
}

fn print_orders(result: &PageResult<Order>, radius: u64) {
    println!(
        "   Page {} of {} ({} hits, links {:?})",
        result.page,
        result.page_link_count,
        result.total_count,
        result.link_window(radius)
    );
    for order in &result.records {
        println!(
            "   • #{} {} [{}] {:.2}",
            order.order_id,
            order.customer_full_name,
            order.category_label(),
            order.taxful_total_price
        );
    }
}

/// Dump all captured metrics, grouped by kind
fn dump_metrics(snapshotter: &Snapshotter) {
    let mut counters = vec![];
    let mut histograms = vec![];

    for (composite_key, _, _, value) in snapshotter.snapshot().into_vec() {
        let (_, key) = composite_key.into_parts();
        let labels: Vec<_> = key.labels().map(|l| format!("{}={}", l.key(), l.value())).collect();
        let label_str = if labels.is_empty() { String::new() } else { format!("{{{}}}", labels.join(",")) };

        match value {
            DebugValue::Counter(v) => counters.push((key.name().to_string(), label_str, v)),
            DebugValue::Histogram(samples) => {
                let count = samples.len();
                let sum: f64 = samples.iter().map(|v| v.into_inner()).sum();
                let avg = if count > 0 { sum / count as f64 } else { 0.0 };
                histograms.push((key.name().to_string(), label_str, count, sum, avg));
            }
            DebugValue::Gauge(_) => {}
        }
    }

    counters.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    histograms.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    if !counters.is_empty() {
        println!("   ┌─ Counters (cumulative)");
        for (name, labels, value) in &counters {
            println!("   │  └─ {}{} = {}", name, labels, value);
        }
    }

    if !histograms.is_empty() {
        println!("   └─ Histograms (distributions)");
        for (name, labels, count, sum, avg) in &histograms {
            println!("   │  └─ {}{}", name, labels);
            println!("   │     count={} sum={:.4} avg={:.4}", count, sum, avg);
        }
    }

    if counters.is_empty() && histograms.is_empty() {
        println!("   └─ (no metrics recorded)");
    }
}
