//! Query defaults and parameter keys.
//!
//! [`QueryConfig`] carries the page and limit a new [`Query`] starts from.
//! Applications that want different defaults construct one (or load it from
//! their own JSON settings) and create queries through it instead of relying
//! on a process-wide default.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::Query;

/// Names of the parameters emitted by [`Query::to_query_map`].
pub struct QueryKeys;

impl QueryKeys {
    /// Free-text search term.
    pub const SEARCH: &'static str = "q";
    /// Page number.
    pub const PAGE: &'static str = "page";
    /// Page size.
    pub const LIMIT: &'static str = "limit";
    /// Merged filter document as JSON.
    pub const FILTER: &'static str = "filter";
    /// Comma-separated projected fields.
    pub const FIELDS: &'static str = "fields";
    /// Sort specification as JSON.
    pub const SORT: &'static str = "sort";
    /// Comma-separated related paths to populate.
    pub const POPULATE: &'static str = "populate";
}

/// Default page used when none is given.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size used when none is given.
pub const DEFAULT_LIMIT: u64 = 10;

/// Defaults applied to newly created queries.
///
/// Missing fields fall back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`]:
///
/// ```
/// use standout_query::QueryConfig;
///
/// let config = QueryConfig::from_json(r#"{"default_limit": 50}"#).unwrap();
/// assert_eq!(config.default_page, 1);
/// assert_eq!(config.query().get_limit(), 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Page a new query starts on (1-indexed).
    pub default_page: u64,
    /// Page size a new query starts with.
    pub default_limit: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryConfig {
    /// Creates a configuration with explicit defaults.
    pub fn new(default_page: u64, default_limit: u64) -> Self {
        QueryConfig {
            default_page,
            default_limit,
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Creates an empty query seeded with these defaults.
    pub fn query(&self) -> Query {
        Query::with_config(self)
    }
}
