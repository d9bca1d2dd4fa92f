//! Query builder.
//!
//! The [`Query`] struct accumulates search, paging, projection, sort and
//! filter intent through a fluent builder API, and renders it into a flat
//! parameter map with [`Query::to_query_map`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::{QueryConfig, QueryKeys};
use crate::error::Result;
use crate::filter::Filter;
use crate::merge::merge_filters;
use crate::ordering::{self, sort_json, Dir, OrderBy};

/// Rendered query parameters, ready for a URL query string.
pub type QueryMap = BTreeMap<String, String>;

/// A REST collection query.
///
/// Parameters emitted by [`to_query_map`](Query::to_query_map):
///
/// | Key | Present when | Value |
/// |-----|--------------|-------|
/// | `q` | search term is non-empty | raw term |
/// | `page` | always | decimal |
/// | `limit` | always | decimal |
/// | `fields` | fields selected | comma separated |
/// | `populate` | paths populated | comma separated |
/// | `filter` | at least one filter | JSON object |
/// | `sort` | at least one ordering | JSON object `{field: 1\|-1}` |
///
/// # Example
///
/// ```
/// use standout_query::{eq, Query};
///
/// let params = Query::for_search("milk")
///     .limit(20)
///     .desc_by("price")
///     .filter(eq("store", "north"))
///     .to_query_map()
///     .unwrap();
///
/// assert_eq!(params["q"], "milk");
/// assert_eq!(params["limit"], "20");
/// assert_eq!(params["sort"], r#"{"price":-1}"#);
/// assert_eq!(params["filter"], r#"{"store":{"$eq":"north"}}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    search: Option<String>,
    page: u64,
    limit: u64,
    filters: Vec<Filter>,
    orderings: Vec<OrderBy>,
    fields: Vec<String>,
    populate: Vec<String>,
}

impl Default for Query {
    fn default() -> Self {
        Query::with_config(&QueryConfig::default())
    }
}

impl Query {
    /// Creates a new query on page 1 with a limit of 10.
    pub fn new() -> Self {
        Query::default()
    }

    /// Alias for [`Query::new`].
    pub fn create() -> Self {
        Query::default()
    }

    /// Creates a new query for the given page.
    pub fn for_page(page: u64) -> Self {
        Query::new().page(page)
    }

    /// Creates a new query with a search term.
    pub fn for_search(term: impl Into<String>) -> Self {
        Query::new().search(term)
    }

    /// Creates a new query with a search term on the given page.
    pub fn for_search_page(term: impl Into<String>, page: u64) -> Self {
        Query::new().search(term).page(page)
    }

    /// Creates a new query seeded with the defaults in `config`.
    pub fn with_config(config: &QueryConfig) -> Self {
        Query {
            search: None,
            page: config.default_page,
            limit: config.default_limit,
            filters: Vec::new(),
            orderings: Vec::new(),
            fields: Vec::new(),
            populate: Vec::new(),
        }
    }

    /// Renders the parameters of a fresh default query.
    pub fn default_query_map() -> Result<QueryMap> {
        Query::new().to_query_map()
    }

    // ========================================================================
    // Search and paging
    // ========================================================================

    /// Sets the free-text search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sets the page number (1-indexed).
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Adds a filter.
    ///
    /// A filter structurally equal to one already present is ignored.
    pub fn filter(mut self, filter: Filter) -> Self {
        if !self.filters.contains(&filter) {
            self.filters.push(filter);
        }
        self
    }

    /// Adds several filters.
    pub fn filters<I>(self, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        filters.into_iter().fold(self, Query::filter)
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Sorts by `field` in the given direction.
    ///
    /// Sorting by a field again changes its direction but keeps its position.
    pub fn sort(mut self, field: &str, dir: Dir) -> Self {
        ordering::upsert(&mut self.orderings, field, dir);
        self
    }

    /// Sorts ascending by `field`.
    pub fn asc_by(self, field: &str) -> Self {
        self.sort(field, Dir::Asc)
    }

    /// Sorts descending by `field`.
    pub fn desc_by(self, field: &str) -> Self {
        self.sort(field, Dir::Desc)
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Restricts the returned fields.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.fields, fields);
        self
    }

    /// Requests population of related paths.
    pub fn populate<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.populate, paths);
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the search term, if set.
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the page number.
    pub fn get_page(&self) -> u64 {
        self.page
    }

    /// Returns the page size.
    pub fn get_limit(&self) -> u64 {
        self.limit
    }

    /// Returns the filters in insertion order.
    pub fn filter_set(&self) -> &[Filter] {
        &self.filters
    }

    /// Returns the orderings in first-insertion order.
    pub fn orderings(&self) -> &[OrderBy] {
        &self.orderings
    }

    /// Returns the selected fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the populated paths.
    pub fn populated(&self) -> &[String] {
        &self.populate
    }

    /// Returns `true` if nothing beyond paging has been set.
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, str::is_empty)
            && self.filters.is_empty()
            && self.orderings.is_empty()
            && self.fields.is_empty()
            && self.populate.is_empty()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Renders this query into string parameters.
    ///
    /// Every filter is validated first; the first invalid one is returned as
    /// the error. The returned map is independent of the builder.
    pub fn to_query_map(&self) -> Result<QueryMap> {
        let mut params = QueryMap::new();

        if let Some(term) = self.search.as_deref().filter(|t| !t.is_empty()) {
            params.insert(QueryKeys::SEARCH.to_string(), term.to_string());
        }

        params.insert(QueryKeys::PAGE.to_string(), self.page.to_string());
        params.insert(QueryKeys::LIMIT.to_string(), self.limit.to_string());

        if !self.fields.is_empty() {
            params.insert(QueryKeys::FIELDS.to_string(), self.fields.join(","));
        }

        if !self.populate.is_empty() {
            params.insert(QueryKeys::POPULATE.to_string(), self.populate.join(","));
        }

        if !self.filters.is_empty() {
            let merged = Value::Object(merge_filters(&self.filters)?);
            params.insert(QueryKeys::FILTER.to_string(), serde_json::to_string(&merged)?);
        }

        if !self.orderings.is_empty() {
            let sort = Value::Object(sort_json(&self.orderings));
            params.insert(QueryKeys::SORT.to_string(), serde_json::to_string(&sort)?);
        }

        log::debug!(
            "rendered query: {} parameters, {} filters, {} orderings",
            params.len(),
            self.filters.len(),
            self.orderings.len()
        );

        Ok(params)
    }
}

fn extend_unique<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for item in items {
        let item = item.into();
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
