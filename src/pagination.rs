use chrono::{DateTime, Local};
use serde::{
    de::{self, SeqAccess, Visitor},
    Deserialize, Deserializer,
};
use std::fmt;
use tracing::trace;

use crate::time::{parse_local, TimeFormat};

/// Page size used when the request does not carry a usable `limit`
pub const DEFAULT_LIMIT: i64 = 20;
/// Zero-based page index used when the request does not carry a `page`
pub const DEFAULT_PAGE: i64 = 0;

/// Normalized listing parameters, as read by data queries
pub trait Pagination {
    /// Search text, trimmed
    fn keywords(&self) -> &str;
    /// Page size
    fn limit(&self) -> i64;
    /// Zero-based page index
    fn page(&self) -> i64;
    /// Lower time bound
    fn begin_time(&self) -> Option<DateTime<Local>>;
    /// Upper time bound
    fn end_time(&self) -> Option<DateTime<Local>>;
    /// Sort tokens in request order
    fn order_by(&self) -> &[String];

    /// The 1-based page number the user asked for.
    ///
    /// This is what `page_info` expects as its current page.
    fn page_number(&self) -> i64 {
        self.page().saturating_add(1)
    }

    /// Number of entries to skip before the current page
    fn offset(&self) -> i64 {
        self.page().saturating_mul(self.limit())
    }
}

/// Raw url parameters of a list request, before any cleaning.
///
/// A repeated scalar key keeps its last value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Search text
    #[serde(deserialize_with = "last_value")]
    pub keywords: Option<String>,
    /// Page size
    #[serde(deserialize_with = "last_value")]
    pub limit: Option<String>,
    /// 1-based page number
    #[serde(deserialize_with = "last_value")]
    pub page: Option<String>,
    /// Sort tokens, the key may be repeated
    pub order_by: Vec<String>,
    /// Lower time bound
    #[serde(deserialize_with = "last_value")]
    pub begin_time: Option<String>,
    /// Upper time bound
    #[serde(deserialize_with = "last_value")]
    pub end_time: Option<String>,
}

/// Accepts a single value or a sequence of them, keeping the last
fn last_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    deserializer.deserialize_any(LastValue)
}

struct LastValue;

impl<'de> Visitor<'de> for LastValue {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a sequence of strings")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut last = None;
        while let Some(value) = seq.next_element::<String>()? {
            last = Some(value);
        }
        Ok(last)
    }
}

/// Cleaned list parameters.
///
/// Deserializing goes through [`ListQuery`], so a bound `ListForm` is always
/// normalized: `limit` is positive and `page` is a non-negative index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ListQuery")]
pub struct ListForm {
    keywords: String,
    limit: i64,
    page: i64,
    order_by: Vec<String>,
    begin_time: Option<DateTime<Local>>,
    end_time: Option<DateTime<Local>>,
}

impl Default for ListForm {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            limit: default_limit(),
            page: default_page(),
            order_by: Vec::new(),
            begin_time: None,
            end_time: None,
        }
    }
}

impl ListForm {
    /// Clean `query`, reading time bounds with `format`
    #[must_use]
    pub fn from_query(query: ListQuery, format: TimeFormat) -> Self {
        let ListQuery { keywords, limit, page, order_by, begin_time, end_time } = query;
        Self {
            keywords: keywords.as_deref().map(clean_keywords).unwrap_or_default(),
            limit: limit.as_deref().map_or_else(default_limit, clean_limit),
            page: page.as_deref().map_or_else(default_page, clean_page),
            order_by: clean_order_by(order_by),
            begin_time: begin_time.as_deref().and_then(|raw| clean_time(raw, format)),
            end_time: end_time.as_deref().and_then(|raw| clean_time(raw, format)),
        }
    }

    /// Sort tokens split into field and direction
    #[must_use]
    pub fn sort_fields(&self) -> Vec<SortField> {
        self.order_by.iter().map(|token| SortField::parse(token)).collect()
    }
}

impl From<ListQuery> for ListForm {
    fn from(query: ListQuery) -> Self {
        Self::from_query(query, TimeFormat::default())
    }
}

impl Pagination for ListForm {
    fn keywords(&self) -> &str {
        self.keywords.trim()
    }

    fn limit(&self) -> i64 {
        self.limit
    }

    fn page(&self) -> i64 {
        self.page
    }

    fn begin_time(&self) -> Option<DateTime<Local>> {
        self.begin_time
    }

    fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    fn order_by(&self) -> &[String] {
        &self.order_by
    }
}

/// One `order_by` token, `-name` sorts descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    /// Field name
    pub field: String,
    /// Descending order
    pub descending: bool,
}

impl SortField {
    /// Split a token such as `-created_at`
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.strip_prefix('-') {
            Some(field) => Self { field: field.to_string(), descending: true },
            None => Self { field: token.to_string(), descending: false },
        }
    }
}

/// Page size when none was given
#[must_use]
pub const fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Page index when none was given
#[must_use]
pub const fn default_page() -> i64 {
    DEFAULT_PAGE
}

/// Turn a 1-based page number into a zero-based index.
///
/// Unparsable text counts as 0, so `"abc"`, `"0"` and `"1"` all map to 0.
/// Numbers outside the `i64` range are unparsable too.
#[must_use]
pub fn clean_page(raw: &str) -> i64 {
    let parsed = raw.parse::<i64>().unwrap_or_else(|_| {
        trace!(raw, "unparsable page, using 0");
        0
    });
    parsed.saturating_sub(1).max(0)
}

/// Page size as given, or [`DEFAULT_LIMIT`] when unparsable or not positive
#[must_use]
pub fn clean_limit(raw: &str) -> i64 {
    match raw.parse::<i64>() {
        Ok(limit) if limit > 0 => limit,
        _ => {
            trace!(raw, "unusable limit, using default");
            default_limit()
        }
    }
}

/// Trim surrounding whitespace
#[must_use]
pub fn clean_keywords(raw: &str) -> String {
    raw.trim().to_string()
}

/// Lower time bound in local time, `None` unless `raw` matches [`crate::time::DATE_TIME_FORMAT`]
#[must_use]
pub fn clean_begin_time(raw: &str) -> Option<DateTime<Local>> {
    clean_time(raw, TimeFormat::default())
}

/// Upper time bound in local time, `None` unless `raw` matches [`crate::time::DATE_TIME_FORMAT`]
#[must_use]
pub fn clean_end_time(raw: &str) -> Option<DateTime<Local>> {
    clean_time(raw, TimeFormat::default())
}

/// Trim sort tokens and drop the empty ones
#[must_use]
pub fn clean_order_by(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

fn clean_time(raw: &str, format: TimeFormat) -> Option<DateTime<Local>> {
    let time = parse_local(raw, format);
    if time.is_none() {
        trace!(raw, "unparsable time bound, ignoring");
    }
    time
}
