//! Folding a set of filters into one JSON object.
//!
//! A query holds any number of filters, but the `filter` parameter is a
//! single JSON object. [`merge_filters`] folds the filters, in insertion
//! order, with these rules:
//!
//! - A new top-level key is appended.
//! - Field filters on the same field merge their operator maps. A repeated
//!   operator takes the later value and keeps its original position.
//! - A repeated `$and` appends its members to the existing `$and` array.
//! - A repeated `$or` is appended to `$and` as `{"$or": [...]}` so that
//!   both disjunctions still apply. `$and` is created if absent.
//!
//! ```
//! use standout_query::{gt, lt, merge_filters};
//!
//! let merged = merge_filters(&[gt("price", 1), lt("price", 5)]).unwrap();
//! assert_eq!(
//!     serde_json::to_string(&merged).unwrap(),
//!     r#"{"price":{"$gt":1,"$lt":5}}"#
//! );
//! ```

use serde_json::{Map, Value};

use crate::error::Result;
use crate::filter::Filter;
use crate::op::Op;

/// Merges filters into a single JSON object, in iteration order.
///
/// Each filter is validated before it is merged; the first invalid one is
/// returned as the error.
pub fn merge_filters<'a, I>(filters: I) -> Result<Map<String, Value>>
where
    I: IntoIterator<Item = &'a Filter>,
{
    let mut merged = Map::new();
    for filter in filters {
        if let Err(err) = filter.validate() {
            log::warn!("rejecting filter {filter}: {err}");
            return Err(err);
        }
        merge_into(&mut merged, filter);
    }
    Ok(merged)
}

fn merge_into(target: &mut Map<String, Value>, filter: &Filter) {
    match filter {
        Filter::Logical {
            op: Op::And,
            filters,
        } => append_to_and(target, filters.iter().map(Filter::to_value)),
        Filter::Logical { op: Op::Or, .. } if target.contains_key(Op::Or.as_str()) => {
            append_to_and(target, std::iter::once(filter.to_value()))
        }
        _ => {
            let key = filter.key();
            let operand = filter.operand();
            match target.get_mut(key) {
                Some(Value::Object(existing)) if operand.is_object() => {
                    if let Value::Object(incoming) = operand {
                        for (op, value) in incoming {
                            if let Some(previous) = existing.insert(op.clone(), value) {
                                log::debug!("filter on '{key}' replaces {op} {previous}");
                            }
                        }
                    }
                }
                _ => {
                    target.insert(key.to_string(), operand);
                }
            }
        }
    }
}

fn append_to_and<I>(target: &mut Map<String, Value>, members: I)
where
    I: IntoIterator<Item = Value>,
{
    let slot = target
        .entry(Op::And.as_str())
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(existing) = slot {
        existing.extend(members);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::filter::{and, eq, gt, gte, in_, lt, or};
    use serde_json::json;

    fn merged_json(filters: &[Filter]) -> String {
        serde_json::to_string(&merge_filters(filters).unwrap()).unwrap()
    }

    #[test]
    fn empty_set_is_empty_object() {
        let none: [Filter; 0] = [];
        assert!(merge_filters(&none).unwrap().is_empty());
    }

    #[test]
    fn single_filter_is_unchanged() {
        let filter = eq("price", 1.28);
        assert_eq!(Value::Object(merge_filters([&filter]).unwrap()), filter.to_value());
    }

    #[test]
    fn distinct_fields_are_unioned_in_order() {
        assert_eq!(
            merged_json(&[eq("name", "a"), gt("qty", 5)]),
            r#"{"name":{"$eq":"a"},"qty":{"$gt":5}}"#
        );
    }

    #[test]
    fn same_field_operators_deep_merge() {
        assert_eq!(
            merged_json(&[gte("qty", 1), lt("qty", 9), in_("tag", ["x"])]),
            r#"{"qty":{"$gte":1,"$lt":9},"tag":{"$in":["x"]}}"#
        );
    }

    #[test]
    fn repeated_operator_takes_later_value_in_place() {
        assert_eq!(
            merged_json(&[gt("qty", 1), lt("qty", 9), gt("qty", 3)]),
            r#"{"qty":{"$gt":3,"$lt":9}}"#
        );
    }

    #[test]
    fn repeated_and_concatenates() {
        let merged = merge_filters(&[and([eq("a", 1)]), eq("b", 2), and([eq("c", 3), eq("d", 4)])]).unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({
                "$and": [{"a": {"$eq": 1}}, {"c": {"$eq": 3}}, {"d": {"$eq": 4}}],
                "b": {"$eq": 2}
            })
        );
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let err = merge_filters(&[eq("a", 1), Filter::logical(Op::Gt, [eq("b", 1)])]).unwrap_err();
        assert!(matches!(err, QueryError::Malformed(_)));

        let err = merge_filters(&[gt("", 1)]).unwrap_err();
        assert!(matches!(err, QueryError::EmptyField));
    }

    #[test]
    fn first_or_is_kept_at_top_level() {
        assert_eq!(
            merged_json(&[or([eq("a", 1), eq("b", 2)])]),
            r#"{"$or":[{"a":{"$eq":1}},{"b":{"$eq":2}}]}"#
        );
    }

    #[test]
    fn repeated_or_folds_into_and() {
        let merged = merge_filters(&[or([eq("a", 1), eq("b", 2)]), or([eq("c", 3), eq("d", 4)])]).unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({
                "$or": [{"a": {"$eq": 1}}, {"b": {"$eq": 2}}],
                "$and": [{"$or": [{"c": {"$eq": 3}}, {"d": {"$eq": 4}}]}]
            })
        );
    }

    #[test]
    fn repeated_or_joins_existing_and() {
        let merged = merge_filters(&[
            and([eq("x", 0)]),
            or([eq("a", 1)]),
            or([eq("b", 2)]),
        ])
        .unwrap();
        assert_eq!(
            Value::Object(merged),
            json!({
                "$and": [{"x": {"$eq": 0}}, {"$or": [{"b": {"$eq": 2}}]}],
                "$or": [{"a": {"$eq": 1}}]
            })
        );
    }
}
