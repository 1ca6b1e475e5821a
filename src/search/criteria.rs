// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Search criteria and their field-rule tables.
//!
//! A criteria type lists its fields as `(FieldSpec, Option<CriterionValue>)`
//! pairs in a fixed order. The composer turns every present value into
//! clauses according to its [`FieldRule`]; absent values contribute
//! nothing. Adding a searchable field means adding a row to the table.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::query_builder::{Clause, RangeBound};

/// How a present criterion becomes clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Tokenized relevance match
    Match,
    /// Equality on a non-analyzed value
    Term { case_insensitive: bool },
    /// Inclusive lower bound
    RangeFrom,
    /// Inclusive upper bound
    RangeTo,
    /// Match + match-bool-prefix on the field, plus a term on
    /// `keyword_field` when given. Only meaningful under
    /// [`super::SearchIntent::Blend`].
    Blended { keyword_field: Option<&'static str> },
}

/// One row of a field-rule table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub rule: FieldRule,
}

impl FieldSpec {
    pub const fn new(field: &'static str, rule: FieldRule) -> Self {
        Self { field, rule }
    }

    /// Clauses for a present, normalized value.
    ///
    /// Range rules need a date or a number; a text value that parses as
    /// neither yields no clause.
    pub fn clauses(&self, value: CriterionValue) -> Vec<Clause> {
        match self.rule {
            FieldRule::Match => vec![Clause::match_text(self.field, value.into_text())],
            FieldRule::Term { case_insensitive } => {
                let text = value.into_text();
                if case_insensitive {
                    vec![Clause::term_ci(self.field, text)]
                } else {
                    vec![Clause::term(self.field, text)]
                }
            }
            FieldRule::RangeFrom => value
                .into_bound()
                .map(|bound| Clause::range(self.field, Some(bound), None))
                .into_iter()
                .collect(),
            FieldRule::RangeTo => value
                .into_bound()
                .map(|bound| Clause::range(self.field, None, Some(bound)))
                .into_iter()
                .collect(),
            FieldRule::Blended { keyword_field } => {
                let text = value.into_text();
                let mut clauses = vec![
                    Clause::match_text(self.field, text.clone()),
                    Clause::match_bool_prefix(self.field, text.clone()),
                ];
                if let Some(keyword) = keyword_field {
                    clauses.push(Clause::term(keyword, text));
                }
                clauses
            }
        }
    }
}

/// A criterion value supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionValue {
    Text(String),
    Date(DateTime<Utc>),
}

impl CriterionValue {
    /// Trim text; blank text counts as absent
    pub fn normalized(self) -> Option<Self> {
        match self {
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(Self::Text(trimmed.to_string()))
                }
            }
            date @ Self::Date(_) => Some(date),
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Date(date) => date.to_rfc3339(),
        }
    }

    fn into_bound(self) -> Option<RangeBound> {
        match self {
            Self::Date(date) => Some(RangeBound::Date(date)),
            Self::Text(text) => {
                if let Ok(number) = text.parse::<f64>() {
                    return Some(RangeBound::Numeric(number));
                }
                DateTime::parse_from_rfc3339(&text)
                    .ok()
                    .map(|date| RangeBound::Date(date.with_timezone(&Utc)))
            }
        }
    }
}

/// A sparse set of optional search fields
pub trait SearchCriteria {
    /// Fields in table order, `None` where the caller supplied nothing
    fn fields(&self) -> Vec<(&'static FieldSpec, Option<CriterionValue>)>;
}

/// A missing criteria object matches everything
impl<C: SearchCriteria> SearchCriteria for Option<C> {
    fn fields(&self) -> Vec<(&'static FieldSpec, Option<CriterionValue>)> {
        self.as_ref().map(SearchCriteria::fields).unwrap_or_default()
    }
}

static ORDER_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new("category", FieldRule::Match),
    FieldSpec::new("customer_full_name", FieldRule::Match),
    FieldSpec::new("order_date", FieldRule::RangeFrom),
    FieldSpec::new("order_date", FieldRule::RangeTo),
    FieldSpec::new(
        "customer_gender",
        FieldRule::Term {
            case_insensitive: true,
        },
    ),
];

/// Structured filters over e-commerce orders
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrderSearchCriteria {
    pub category: Option<String>,
    pub customer_full_name: Option<String>,
    pub order_date_start: Option<DateTime<Utc>>,
    pub order_date_end: Option<DateTime<Utc>>,
    pub gender: Option<String>,
}

impl SearchCriteria for OrderSearchCriteria {
    fn fields(&self) -> Vec<(&'static FieldSpec, Option<CriterionValue>)> {
        let values = [
            self.category.clone().map(CriterionValue::Text),
            self.customer_full_name.clone().map(CriterionValue::Text),
            self.order_date_start.map(CriterionValue::Date),
            self.order_date_end.map(CriterionValue::Date),
            self.gender.clone().map(CriterionValue::Text),
        ];
        ORDER_FIELDS.iter().zip(values).collect()
    }
}

static BLOG_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    "content",
    FieldRule::Blended {
        keyword_field: Some("tags"),
    },
)];

/// Free-text search over blog posts
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BlogSearchCriteria {
    pub text: Option<String>,
}

impl BlogSearchCriteria {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl SearchCriteria for BlogSearchCriteria {
    fn fields(&self) -> Vec<(&'static FieldSpec, Option<CriterionValue>)> {
        vec![(&BLOG_FIELDS[0], self.text.clone().map(CriterionValue::Text))]
    }
}
