//! Query - MongoDB-style filters and REST query parameters.
//!
//! This crate builds the query-string parameters a REST collection endpoint
//! expects: a search term, paging, field projection, population, a sort
//! specification and a filter document. Filters and sort specs are encoded as
//! compact JSON with keys in insertion order.
//!
//! - Comparison filters: `eq`, `ne`, `gt`, `gte`, `lt`, `lte`
//! - Membership filters: `in_`, `not_in`
//! - Logical filters: `and`, `or`
//! - A fluent [`Query`] builder rendering to a string map
//!
//! # Quick Start
//!
//! ```rust
//! use standout_query::{and, gte, in_, lt, Query};
//!
//! let params = Query::for_page(2)
//!     .limit(25)
//!     .filter(and([gte("qty", 10), lt("qty", 50)]))
//!     .filter(in_("status", ["A", "D"]))
//!     .desc_by("created")
//!     .asc_by("name")
//!     .to_query_map()
//!     .unwrap();
//!
//! assert_eq!(params["page"], "2");
//! assert_eq!(params["limit"], "25");
//! assert_eq!(
//!     params["filter"],
//!     r#"{"$and":[{"qty":{"$gte":10}},{"qty":{"$lt":50}}],"status":{"$in":["A","D"]}}"#
//! );
//! assert_eq!(params["sort"], r#"{"created":-1,"name":1}"#);
//! ```
//!
//! # Filter Set Semantics
//!
//! A query keeps its filters as an insertion-ordered set: adding a filter
//! equal to one already present has no effect. When rendered, the set is
//! folded into one JSON object by [`merge_filters`]; filters on the same
//! field combine their operators, so `gt("qty", 1)` and `lt("qty", 9)`
//! render as `{"qty":{"$gt":1,"$lt":9}}`.
//!
//! # Defaults
//!
//! New queries start on page 1 with a limit of 10. Use [`QueryConfig`] to
//! create queries with other defaults.

mod config;
mod error;
mod filter;
mod merge;
mod op;
mod ordering;
mod query;

// Re-export public API
pub use config::{QueryConfig, QueryKeys, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use error::{QueryError, Result};
pub use filter::{and, eq, gt, gte, in_, lt, lte, ne, not_in, or, Filter};
pub use merge::merge_filters;
pub use op::Op;
pub use ordering::{sort_json, Dir, OrderBy};
pub use query::{Query, QueryMap};
