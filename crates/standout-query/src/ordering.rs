//! Ordering types for the sort parameter.
//!
//! Provides [`Dir`] for sort direction and [`OrderBy`] for field-based ordering.
//! A sort specification is an ordered list of `OrderBy` entries with unique
//! fields, rendered as `{"field": 1, "other": -1}`.

use serde_json::{Map, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the wire value: `1` ascending, `-1` descending.
    pub fn as_i8(self) -> i8 {
        match self {
            Dir::Asc => 1,
            Dir::Desc => -1,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ordering clause specifying a field and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub dir: Dir,
}

impl OrderBy {
    /// Creates a new ascending ordering for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            dir: Dir::Asc,
        }
    }

    /// Creates a new descending ordering for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        OrderBy {
            field: field.into(),
            dir: Dir::Desc,
        }
    }

    /// Creates a new ordering with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        OrderBy {
            field: field.into(),
            dir,
        }
    }
}

/// Inserts or updates an ordering for `field`.
///
/// An existing entry keeps its position and only changes direction.
pub(crate) fn upsert(orderings: &mut Vec<OrderBy>, field: &str, dir: Dir) {
    match orderings.iter_mut().find(|o| o.field == field) {
        Some(existing) => existing.dir = dir,
        None => orderings.push(OrderBy::new(field, dir)),
    }
}

/// Renders orderings as a JSON object `{field: 1|-1}` in slice order.
pub fn sort_json(orderings: &[OrderBy]) -> Map<String, Value> {
    orderings
        .iter()
        .map(|o| (o.field.clone(), Value::from(o.dir.as_i8())))
        .collect()
}
