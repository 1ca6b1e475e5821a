// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Elasticsearch Translator
//!
//! Translates composite queries to the Elasticsearch query DSL.
//!
//! # Query DSL Generated
//!
//! ```text
//! {"match_all": {}}                                   - Match everything
//! {"match": {"f": {"query": "q"}}}                    - Full-text match
//! {"match_phrase": {"f": {"query": "q"}}}             - Phrase
//! {"match_bool_prefix": {"f": {"query": "q"}}}        - Search-as-you-type
//! {"term": {"f": {"value": v}}}                       - Exact term
//! {"terms": {"f": ["a", "b"]}}                        - Term set
//! {"range": {"f": {"gte": a, "lte": b}}}              - Inclusive range
//! {"prefix": {"f": {"value": "p"}}}                   - Prefix
//! {"wildcard": {"f": {"value": "p*"}}}                - Wildcard
//! {"fuzzy": {"f": {"value": "v", "fuzziness": 1}}}    - Fuzzy
//! {"bool": {"must": [...]}} / {"bool": {"should": [...]}}
//! ```

use serde_json::{json, Map, Value};

use super::query_builder::{Clause, Combinator, CompositeQuery, RangeBound, TermValue};
use crate::index::{SearchRequest, SortOrder};

/// Elasticsearch query DSL translator
pub struct ElasticsearchTranslator;

impl ElasticsearchTranslator {
    /// Translate a composite query to a `bool` query
    pub fn translate(query: &CompositeQuery) -> Value {
        let occur = match query.combinator() {
            Combinator::Must => "must",
            Combinator::Should => "should",
        };
        let clauses: Vec<Value> = query.clauses().iter().map(Self::translate_clause).collect();
        json!({ "bool": Self::keyed(occur, Value::Array(clauses)) })
    }

    /// Translate a full search request to a `_search` body
    pub fn search_body(request: &SearchRequest) -> Value {
        let mut body = json!({
            "from": request.offset,
            "size": request.limit,
            "query": Self::translate(&request.query),
        });
        if let Some(sort) = &request.sort {
            let order = match sort.order {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            };
            body["sort"] = json!([Self::keyed(&sort.field, json!({ "order": order }))]);
        }
        body
    }

    /// Translate one leaf clause
    pub fn translate_clause(clause: &Clause) -> Value {
        match clause {
            Clause::MatchAll => json!({ "match_all": {} }),
            Clause::Match { field, query } => Self::leaf("match", field, json!({ "query": query })),
            Clause::MatchPhrase { field, query } => {
                Self::leaf("match_phrase", field, json!({ "query": query }))
            }
            Clause::MatchBoolPrefix { field, query } => {
                Self::leaf("match_bool_prefix", field, json!({ "query": query }))
            }
            Clause::Term {
                field,
                value,
                case_insensitive,
            } => {
                let mut body = json!({ "value": Self::term_value(value) });
                if *case_insensitive {
                    body["case_insensitive"] = Value::Bool(true);
                }
                Self::leaf("term", field, body)
            }
            Clause::Terms { field, values } => Self::leaf("terms", field, json!(values)),
            Clause::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(bound) = gte {
                    bounds.insert("gte".to_string(), Self::bound_value(bound));
                }
                if let Some(bound) = lte {
                    bounds.insert("lte".to_string(), Self::bound_value(bound));
                }
                Self::leaf("range", field, Value::Object(bounds))
            }
            Clause::Prefix { field, value } => Self::leaf("prefix", field, json!({ "value": value })),
            Clause::Wildcard { field, pattern } => {
                Self::leaf("wildcard", field, json!({ "value": pattern }))
            }
            Clause::Fuzzy {
                field,
                value,
                fuzziness,
            } => Self::leaf(
                "fuzzy",
                field,
                json!({ "value": value, "fuzziness": fuzziness }),
            ),
        }
    }

    fn leaf(kind: &str, field: &str, body: Value) -> Value {
        Self::keyed(kind, Self::keyed(field, body))
    }

    fn keyed(key: &str, value: Value) -> Value {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        Value::Object(map)
    }

    fn term_value(value: &TermValue) -> Value {
        match value {
            TermValue::Text(text) => Value::String(text.clone()),
            TermValue::Numeric(number) => json!(number),
            TermValue::Boolean(flag) => Value::Bool(*flag),
        }
    }

    fn bound_value(bound: &RangeBound) -> Value {
        match bound {
            RangeBound::Numeric(number) => json!(number),
            RangeBound::Date(date) => Value::String(date.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Sort;
    use crate::search::query_builder::QueryBuilder;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_match_all() {
        let dsl = ElasticsearchTranslator::translate(&CompositeQuery::match_all());
        assert_eq!(dsl, json!({"bool": {"must": [{"match_all": {}}]}}));
    }

    #[test]
    fn test_match_clause() {
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::match_text(
            "category",
            "Men's Clothing",
        ));
        assert_eq!(dsl, json!({"match": {"category": {"query": "Men's Clothing"}}}));
    }

    #[test]
    fn test_term_case_insensitive() {
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::term_ci("customer_gender", "male"));
        assert_eq!(
            dsl,
            json!({"term": {"customer_gender": {"value": "male", "case_insensitive": true}}})
        );
    }

    #[test]
    fn test_term_case_sensitive_omits_flag() {
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::term("tags", "rust"));
        assert_eq!(dsl, json!({"term": {"tags": {"value": "rust"}}}));
    }

    #[test]
    fn test_terms_clause() {
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::terms(
            "customer_first_name.keyword",
            ["Eddie", "Mary"],
        ));
        assert_eq!(dsl, json!({"terms": {"customer_first_name.keyword": ["Eddie", "Mary"]}}));
    }

    #[test]
    fn test_numeric_range() {
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::range(
            "taxful_total_price",
            Some(RangeBound::Numeric(10.0)),
            Some(RangeBound::Numeric(50.5)),
        ));
        assert_eq!(
            dsl,
            json!({"range": {"taxful_total_price": {"gte": 10.0, "lte": 50.5}}})
        );
    }

    #[test]
    fn test_date_range_lower_only() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::range(
            "order_date",
            Some(RangeBound::Date(start)),
            None,
        ));
        assert_eq!(
            dsl,
            json!({"range": {"order_date": {"gte": "2024-05-01T00:00:00+00:00"}}})
        );
    }

    #[test]
    fn test_fuzzy_clause() {
        let dsl = ElasticsearchTranslator::translate_clause(&Clause::fuzzy(
            "customer_first_name.keyword",
            "Edie",
            1,
        ));
        assert_eq!(
            dsl,
            json!({"fuzzy": {"customer_first_name.keyword": {"value": "Edie", "fuzziness": 1}}})
        );
    }

    #[test]
    fn test_wildcard_and_prefix() {
        assert_eq!(
            ElasticsearchTranslator::translate_clause(&Clause::wildcard("customer_full_name.keyword", "Ed*")),
            json!({"wildcard": {"customer_full_name.keyword": {"value": "Ed*"}}})
        );
        assert_eq!(
            ElasticsearchTranslator::translate_clause(&Clause::prefix("customer_full_name.keyword", "Edd")),
            json!({"prefix": {"customer_full_name.keyword": {"value": "Edd"}}})
        );
    }

    #[test]
    fn test_should_query() {
        let query = QueryBuilder::new()
            .clause(Clause::match_text("content", "John"))
            .clause(Clause::match_bool_prefix("content", "John"))
            .build_should();
        assert_eq!(
            ElasticsearchTranslator::translate(&query),
            json!({"bool": {"should": [
                {"match": {"content": {"query": "John"}}},
                {"match_bool_prefix": {"content": {"query": "John"}}}
            ]}})
        );
    }

    #[test]
    fn test_search_body_with_sort() {
        let request = SearchRequest {
            index: "kibana_sample_data_ecommerce".to_string(),
            query: CompositeQuery::match_all(),
            offset: 20,
            limit: 10,
            sort: Some(Sort::desc("taxful_total_price")),
        };
        assert_eq!(
            ElasticsearchTranslator::search_body(&request),
            json!({
                "from": 20,
                "size": 10,
                "query": {"bool": {"must": [{"match_all": {}}]}},
                "sort": [{"taxful_total_price": {"order": "desc"}}]
            })
        );
    }

    #[test]
    fn test_search_body_without_sort() {
        let request = SearchRequest {
            index: "blog".to_string(),
            query: CompositeQuery::match_all(),
            offset: 0,
            limit: 10,
            sort: None,
        };
        let body = ElasticsearchTranslator::search_body(&request);
        assert!(body.get("sort").is_none());
    }
}
