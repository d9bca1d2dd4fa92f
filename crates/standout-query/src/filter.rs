//! Filter expressions.
//!
//! A [`Filter`] is one MongoDB-style predicate: a comparison on a field,
//! a set membership test on a field, or a logical combination of other
//! filters. Filters are immutable values; combining them only nests.
//!
//! Every filter encodes to a single-key JSON object:
//!
//! ```text
//! {"price": {"$gt": 10}}                       comparison
//! {"tag": {"$in": ["a", "b"]}}                 membership
//! {"$or": [{"qty": {"$lt": 5}}, {...}]}        logical
//! ```
//!
//! # Example
//!
//! ```
//! use standout_query::{and, eq, gt};
//!
//! let filter = and([eq("status", "active"), gt("qty", 5)]);
//! assert_eq!(
//!     filter.to_json().unwrap(),
//!     r#"{"$and":[{"status":{"$eq":"active"}},{"qty":{"$gt":5}}]}"#
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{QueryError, Result};
use crate::op::Op;

/// A single filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `{field: {op: value}}` for one of the comparison operators.
    Comparison {
        field: String,
        op: Op,
        value: Value,
    },
    /// `{field: {op: [values...]}}` for `$in` / `$nin`.
    Membership {
        field: String,
        op: Op,
        values: Vec<Value>,
    },
    /// `{op: [filter...]}` for `$and` / `$or`.
    Logical { op: Op, filters: Vec<Filter> },
}

impl Filter {
    /// Creates a comparison filter with an explicit operator.
    pub fn compare(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Filter::Comparison {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Creates a set membership filter with an explicit operator.
    pub fn membership<I, V>(field: impl Into<String>, op: Op, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Filter::Membership {
            field: field.into(),
            op,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a logical combination with an explicit operator.
    pub fn logical<I>(op: Op, filters: I) -> Self
    where
        I: IntoIterator<Item = Filter>,
    {
        Filter::Logical {
            op,
            filters: filters.into_iter().collect(),
        }
    }

    /// Returns the operator of this filter.
    pub fn op(&self) -> Op {
        match self {
            Filter::Comparison { op, .. }
            | Filter::Membership { op, .. }
            | Filter::Logical { op, .. } => *op,
        }
    }

    /// Returns the top-level key: the field name, or the logical token.
    pub fn key(&self) -> &str {
        match self {
            Filter::Comparison { field, .. } | Filter::Membership { field, .. } => field,
            Filter::Logical { op, .. } => op.as_str(),
        }
    }

    /// Checks that this filter would encode to a well-formed expression.
    ///
    /// Field names must be non-empty and must not start with `$`, operators
    /// must match the variant they are stored in, and logical combinations
    /// need at least one member. Members are checked recursively.
    pub fn validate(&self) -> Result<()> {
        match self {
            Filter::Comparison { field, op, .. } => {
                check_field(field)?;
                check_kind(*op, op.is_comparison(), "comparison")
            }
            Filter::Membership { field, op, .. } => {
                check_field(field)?;
                check_kind(*op, op.is_membership(), "membership")
            }
            Filter::Logical { op, filters } => {
                check_kind(*op, op.is_logical(), "logical")?;
                if filters.is_empty() {
                    return Err(QueryError::EmptyLogical(*op));
                }
                filters.iter().try_for_each(Filter::validate)
            }
        }
    }

    /// Converts this filter to its JSON object form.
    pub fn to_value(&self) -> Value {
        let mut outer = Map::new();
        outer.insert(self.key().to_string(), self.operand());
        Value::Object(outer)
    }

    /// The value stored under [`key`](Filter::key).
    pub(crate) fn operand(&self) -> Value {
        match self {
            Filter::Comparison { op, value, .. } => {
                let mut inner = Map::new();
                inner.insert(op.as_str().to_string(), value.clone());
                Value::Object(inner)
            }
            Filter::Membership { op, values, .. } => {
                let mut inner = Map::new();
                inner.insert(op.as_str().to_string(), Value::Array(values.clone()));
                Value::Object(inner)
            }
            Filter::Logical { filters, .. } => {
                Value::Array(filters.iter().map(Filter::to_value).collect())
            }
        }
    }

    /// Encodes this filter as compact JSON.
    ///
    /// The filter is validated first, so a malformed filter is an error
    /// rather than JSON that [`from_json`](Filter::from_json) cannot read.
    pub fn to_json(&self) -> Result<String> {
        self.validate()?;
        Ok(serde_json::to_string(&self.to_value())?)
    }

    /// Decodes a filter from its JSON object form.
    ///
    /// The object must have exactly one key. A `$and` / `$or` key expects an
    /// array of filters; any other key is a field name whose value is a
    /// single-operator object.
    pub fn from_value(value: &Value) -> Result<Filter> {
        let (key, inner) = single_entry(value)?;

        if key.starts_with('$') {
            let op: Op = key.parse()?;
            if !op.is_logical() {
                return Err(QueryError::Malformed(format!(
                    "'{op}' is not valid at the top level"
                )));
            }
            let members = inner
                .as_array()
                .ok_or_else(|| QueryError::Malformed(format!("'{op}' expects an array")))?;
            let filters = members
                .iter()
                .map(Filter::from_value)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Filter::Logical { op, filters });
        }

        let (token, operand) = single_entry(inner)?;
        let op: Op = token.parse()?;
        if op.is_comparison() {
            Ok(Filter::Comparison {
                field: key.clone(),
                op,
                value: operand.clone(),
            })
        } else if op.is_membership() {
            let values = operand
                .as_array()
                .ok_or_else(|| QueryError::Malformed(format!("'{op}' expects an array")))?;
            Ok(Filter::Membership {
                field: key.clone(),
                op,
                values: values.clone(),
            })
        } else {
            Err(QueryError::Malformed(format!(
                "'{op}' cannot be applied to field '{key}'"
            )))
        }
    }

    /// Decodes a filter from a JSON string.
    pub fn from_json(json: &str) -> Result<Filter> {
        let value: Value = serde_json::from_str(json)?;
        Filter::from_value(&value)
    }
}

fn check_field(field: &str) -> Result<()> {
    if field.is_empty() {
        return Err(QueryError::EmptyField);
    }
    if field.starts_with('$') {
        return Err(QueryError::InvalidField(field.to_string()));
    }
    Ok(())
}

fn check_kind(op: Op, ok: bool, kind: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(QueryError::Malformed(format!("'{op}' is not a {kind} operator")))
    }
}

fn single_entry(value: &Value) -> Result<(&String, &Value)> {
    let object = value
        .as_object()
        .ok_or_else(|| QueryError::Malformed(format!("expected an object, found {value}")))?;
    let mut entries = object.iter();
    match (entries.next(), entries.next()) {
        (Some(entry), None) => Ok(entry),
        _ => Err(QueryError::Malformed(format!(
            "expected a single-key object, found {} keys",
            object.len()
        ))),
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.validate().map_err(serde::ser::Error::custom)?;
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Filter::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Factory functions
// ============================================================================

/// `{field: {"$eq": value}}`
pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Filter {
    Filter::compare(field, Op::Eq, value)
}

/// `{field: {"$ne": value}}`
pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Filter {
    Filter::compare(field, Op::Ne, value)
}

/// `{field: {"$gt": value}}`
pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Filter {
    Filter::compare(field, Op::Gt, value)
}

/// `{field: {"$gte": value}}`
pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Filter {
    Filter::compare(field, Op::Gte, value)
}

/// `{field: {"$lt": value}}`
pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Filter {
    Filter::compare(field, Op::Lt, value)
}

/// `{field: {"$lte": value}}`
pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Filter {
    Filter::compare(field, Op::Lte, value)
}

/// `{field: {"$in": [values...]}}`
///
/// Values keep their order and duplicates are not removed.
pub fn in_<I, V>(field: impl Into<String>, values: I) -> Filter
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Filter::membership(field, Op::In, values)
}

/// `{field: {"$nin": [values...]}}`
pub fn not_in<I, V>(field: impl Into<String>, values: I) -> Filter
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Filter::membership(field, Op::Nin, values)
}

/// `{"$and": [filters...]}` in argument order.
pub fn and<I>(filters: I) -> Filter
where
    I: IntoIterator<Item = Filter>,
{
    Filter::logical(Op::And, filters)
}

/// `{"$or": [filters...]}` in argument order.
pub fn or<I>(filters: I) -> Filter
where
    I: IntoIterator<Item = Filter>,
{
    Filter::logical(Op::Or, filters)
}
