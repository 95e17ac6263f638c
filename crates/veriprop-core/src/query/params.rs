//! Query parameters: raw transport input and its normalized form.
//!
//! Normalization never rejects input. Missing numbers take their defaults,
//! negative or unreadable numbers are clamped to the minimum (`page` 0,
//! `page_size` 1), and filter values equal to `"all"` are dropped.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Page size used when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter value meaning "no filter".
pub const ALL: &str = "all";

const MIN_PAGE: usize = 0;
const MIN_PAGE_SIZE: usize = 1;

/// Query parameters exactly as the request layer received them.
///
/// Every value is kept as text; keys other than `query`, `status`, `page`
/// and `page_size` land in `filters` (e.g. `verifier_id`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawQuery {
    #[serde(default)]
    pub query: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub page: Option<String>,

    #[serde(default, deserialize_with = "loose_string")]
    pub page_size: Option<String>,

    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

/// Accept `"2"`, `2` and `2.0` alike for numeric parameters.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|v| match v {
        Loose::Text(s) => s,
        Loose::Int(n) => n.to_string(),
        Loose::Float(f) => f.to_string(),
    }))
}

impl RawQuery {
    /// Build from `key=value` pairs (query string, CLI flags, ...).
    ///
    /// Later pairs win when a key repeats.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = RawQuery::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "query" => raw.query = Some(value),
                "status" => raw.status = Some(value),
                "page" => raw.page = Some(value),
                "page_size" => raw.page_size = Some(value),
                other => {
                    raw.filters.insert(other.to_string(), value);
                }
            }
        }
        raw
    }

    /// Normalize with the stock default page size.
    pub fn into_params(self) -> QueryParams {
        self.normalize(DEFAULT_PAGE_SIZE)
    }

    /// Normalize into [`QueryParams`], clamping instead of failing.
    pub fn normalize(&self, default_page_size: usize) -> QueryParams {
        let page = clamp_number("page", self.page.as_deref(), MIN_PAGE, MIN_PAGE);
        let page_size = clamp_number(
            "page_size",
            self.page_size.as_deref(),
            default_page_size.max(MIN_PAGE_SIZE),
            MIN_PAGE_SIZE,
        );

        let filters = self
            .filters
            .iter()
            .filter_map(|(k, v)| active_filter(Some(v.as_str())).map(|v| (k.clone(), v)))
            .collect();

        QueryParams {
            query: self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            status: active_filter(self.status.as_deref()),
            page,
            page_size,
            filters,
        }
    }
}

/// `None` for missing, blank or `"all"` values.
fn active_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(ALL))
        .map(str::to_string)
}

fn clamp_number(name: &str, raw: Option<&str>, default: usize, min: usize) -> usize {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return default;
    };

    let parsed = text.parse::<i64>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
    });

    match parsed {
        Some(n) if n >= min as i64 => usize::try_from(n).unwrap_or(usize::MAX),
        _ => {
            tracing::warn!(param = name, value = text, clamped_to = min, "query parameter clamped");
            min
        }
    }
}

/// Normalized query parameters handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Free-text needle; trimmed and never empty.
    pub query: Option<String>,

    /// Status filter (may be a comma-separated list); never `"all"`.
    pub status: Option<String>,

    /// Zero-indexed page number.
    pub page: usize,

    /// Always at least 1.
    pub page_size: usize,

    /// Resource-specific filters keyed by field name.
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            query: None,
            status: None,
            page: MIN_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            filters: BTreeMap::new(),
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = Some(query.trim().to_string()).filter(|q| !q.is_empty());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        let status = status.into();
        self.status = active_filter(Some(status.as_str()));
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(MIN_PAGE_SIZE);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match active_filter(Some(value.as_str())) {
            Some(v) => {
                self.filters.insert(key, v);
            }
            None => {
                self.filters.remove(&key);
            }
        }
        self
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }
}
