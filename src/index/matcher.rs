// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Clause evaluation against JSON documents.
//!
//! Field paths are dotted (`geoip.city_name`). A trailing `.keyword` selects
//! the raw, unanalyzed value of the same field. Arrays match when any
//! element matches. Text analysis lowercases and splits on anything that is
//! not alphanumeric or an inner apostrophe. Fuzzy clauses count plain
//! Levenshtein edits, at most two.

use std::cmp::Ordering;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use glob::{MatchOptions, Pattern};
use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder};
use serde_json::Value;

use crate::search::{Clause, Combinator, CompositeQuery, RangeBound, TermValue};

/// Does `doc` satisfy the composite query?
pub(crate) fn matches_query(query: &CompositeQuery, doc: &Value) -> bool {
    let mut clauses = query.clauses().iter();
    match query.combinator() {
        Combinator::Must => clauses.all(|clause| matches_clause(clause, doc)),
        Combinator::Should => clauses.any(|clause| matches_clause(clause, doc)),
    }
}

pub(crate) fn matches_clause(clause: &Clause, doc: &Value) -> bool {
    match clause {
        Clause::MatchAll => true,
        Clause::Match { field, query } => {
            let wanted = analyze(query);
            !wanted.is_empty()
                && texts(doc, field).into_iter().any(|text| {
                    let tokens = analyze(&text);
                    wanted.iter().any(|token| tokens.contains(token))
                })
        }
        Clause::MatchPhrase { field, query } => {
            let wanted = analyze(query);
            !wanted.is_empty()
                && texts(doc, field).into_iter().any(|text| {
                    analyze(&text)
                        .windows(wanted.len())
                        .any(|window| window == wanted.as_slice())
                })
        }
        Clause::MatchBoolPrefix { field, query } => {
            let wanted = analyze(query);
            let Some((last, leading)) = wanted.split_last() else {
                return false;
            };
            texts(doc, field).into_iter().any(|text| {
                analyze(&text)
                    .iter()
                    .any(|token| leading.contains(token) || token.starts_with(last.as_str()))
            })
        }
        Clause::Term {
            field,
            value,
            case_insensitive,
        } => field_values(doc, field)
            .into_iter()
            .any(|candidate| term_equals(candidate, value, *case_insensitive)),
        Clause::Terms { field, values } => strings(doc, field).any(|s| values.iter().any(|v| v == s)),
        Clause::Range { field, gte, lte } => field_values(doc, field)
            .into_iter()
            .any(|candidate| within(candidate, gte.as_ref(), lte.as_ref())),
        Clause::Prefix { field, value } => strings(doc, field).any(|s| s.starts_with(value.as_str())),
        Clause::Wildcard { field, pattern } => {
            let pattern = wildcard_pattern(pattern);
            strings(doc, field).any(|s| wildcard_match(pattern.as_ref(), s))
        }
        Clause::Fuzzy {
            field,
            value,
            fuzziness,
        } => {
            let dfa = fuzzy_builder().build_dfa(value);
            let max = (*fuzziness).min(MAX_FUZZINESS);
            strings(doc, field).any(|s| matches!(dfa.eval(s), Distance::Exact(d) if d <= max))
        }
    }
}

/// Order two documents by a sort field; missing values sort last
pub(crate) fn compare_by_field(a: &Value, b: &Value, field: &str, descending: bool) -> Ordering {
    let left = field_values(a, field).into_iter().next();
    let right = field_values(b, field).into_iter().next();
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => {
            let ordering = compare_scalars(x, y);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}

fn compare_scalars(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Non-null leaf values at `path`, arrays flattened
fn field_values<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let path = path.strip_suffix(".keyword").unwrap_or(path);
    let mut current = vec![doc];
    for segment in path.split('.') {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => next.extend(map.get(segment)),
                Value::Array(items) => next.extend(items.iter().filter_map(|item| item.get(segment))),
                _ => {}
            }
        }
        current = next;
    }

    current
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        })
        .filter(|value| !value.is_null())
        .collect()
}

fn strings<'a>(doc: &'a Value, path: &str) -> impl Iterator<Item = &'a str> {
    field_values(doc, path).into_iter().filter_map(Value::as_str)
}

/// Scalars rendered as text for analysis
fn texts(doc: &Value, path: &str) -> Vec<String> {
    field_values(doc, path)
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn analyze(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\''))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn term_equals(candidate: &Value, value: &TermValue, case_insensitive: bool) -> bool {
    match (value, candidate) {
        (TermValue::Text(wanted), Value::String(actual)) => {
            if case_insensitive {
                actual.to_lowercase() == wanted.to_lowercase()
            } else {
                actual == wanted
            }
        }
        (TermValue::Text(wanted), Value::Number(actual)) => actual.to_string() == *wanted,
        (TermValue::Numeric(wanted), Value::Number(actual)) => actual.as_f64() == Some(*wanted),
        (TermValue::Boolean(wanted), Value::Bool(actual)) => wanted == actual,
        _ => false,
    }
}

fn within(candidate: &Value, gte: Option<&RangeBound>, lte: Option<&RangeBound>) -> bool {
    let lower_ok = match gte {
        Some(bound) => matches!(
            compare_to_bound(candidate, bound),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        None => true,
    };
    let upper_ok = match lte {
        Some(bound) => matches!(
            compare_to_bound(candidate, bound),
            Some(Ordering::Less | Ordering::Equal)
        ),
        None => true,
    };
    lower_ok && upper_ok
}

fn compare_to_bound(candidate: &Value, bound: &RangeBound) -> Option<Ordering> {
    match bound {
        RangeBound::Numeric(limit) => candidate.as_f64()?.partial_cmp(limit),
        RangeBound::Date(limit) => parse_date(candidate.as_str()?).map(|date| date.cmp(limit)),
    }
}

/// RFC 3339, or a naive date/date-time taken as UTC
fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

/// Compile an index-style wildcard (`*` any run, `?` one character).
///
/// Every other character is literal, `[` and `]` included. `None` only if
/// the escaped pattern still fails to compile.
fn wildcard_pattern(pattern: &str) -> Option<Pattern> {
    let mut glob = String::with_capacity(pattern.len());
    let mut previous_star = false;
    for c in pattern.chars() {
        match c {
            // Runs of `*` collapse; glob rejects `**` inside a component
            '*' if previous_star => continue,
            '*' | '?' => glob.push(c),
            other => glob.push_str(&Pattern::escape(other.encode_utf8(&mut [0; 4]))),
        }
        previous_star = c == '*';
    }
    Pattern::new(&glob).ok()
}

fn wildcard_match(pattern: Option<&Pattern>, text: &str) -> bool {
    pattern.is_some_and(|pattern| pattern.matches_with(text, MatchOptions::new()))
}

/// Largest edit distance a fuzzy clause can ask for
const MAX_FUZZINESS: u8 = 2;

fn fuzzy_builder() -> &'static LevenshteinAutomatonBuilder {
    static BUILDER: OnceLock<LevenshteinAutomatonBuilder> = OnceLock::new();
    BUILDER.get_or_init(|| LevenshteinAutomatonBuilder::new(MAX_FUZZINESS, false))
}
