//! Property-based tests for filters and query maps using proptest.

use proptest::prelude::*;
use serde_json::Value;
use standout_query::{and, eq, gt, gte, in_, lt, lte, ne, not_in, or, Filter, Query};

// ============================================================================
// Strategies
// ============================================================================

fn field_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // Quarter steps keep decimal round trips exact.
        (-1_000_000i32..1_000_000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[ -~]{0,12}".prop_map(Value::from),
    ]
}

fn leaf_strategy() -> impl Strategy<Value = Filter> {
    let comparison = (field_strategy(), scalar_strategy(), 0usize..6).prop_map(|(f, v, k)| {
        match k {
            0 => eq(f, v),
            1 => ne(f, v),
            2 => gt(f, v),
            3 => gte(f, v),
            4 => lt(f, v),
            _ => lte(f, v),
        }
    });
    let membership = (
        field_strategy(),
        prop::collection::vec(scalar_strategy(), 0..5),
        any::<bool>(),
    )
        .prop_map(|(f, vs, negate)| if negate { not_in(f, vs) } else { in_(f, vs) });
    prop_oneof![comparison, membership]
}

fn filter_strategy() -> impl Strategy<Value = Filter> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        (prop::collection::vec(inner, 1..4), any::<bool>())
            .prop_map(|(members, conj)| if conj { and(members) } else { or(members) })
    })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Encoding then decoding a filter yields the same filter.
    #[test]
    fn filter_json_round_trip(filter in filter_strategy()) {
        let encoded = filter.to_json().unwrap();
        let decoded = Filter::from_json(&encoded).unwrap();
        prop_assert_eq!(decoded, filter);
    }

    /// Every generated filter is well formed and encodes to a single-key object.
    #[test]
    fn filter_is_single_key_object(filter in filter_strategy()) {
        prop_assert!(filter.validate().is_ok());
        let value = filter.to_value();
        let object = value.as_object().unwrap();
        prop_assert_eq!(object.len(), 1);
        prop_assert_eq!(object.keys().next().unwrap().as_str(), filter.key());
    }

    /// Rendering twice without mutation yields equal maps.
    #[test]
    fn to_query_map_is_idempotent(
        filters in prop::collection::vec(filter_strategy(), 0..4),
        page in 1u64..1000,
        limit in 1u64..200,
    ) {
        let query = Query::for_page(page).limit(limit).filters(filters);
        let first = query.to_query_map().unwrap();
        let second = query.to_query_map().unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first["page"], &page.to_string());
        prop_assert_eq!(&first["limit"], &limit.to_string());
    }

    /// Sort keys appear in first-insertion order, each with its last direction.
    #[test]
    fn sort_keeps_first_insertion_order(
        calls in prop::collection::vec((0usize..5, any::<bool>()), 1..20),
    ) {
        let names = ["a", "b", "c", "d", "e"];
        let mut query = Query::new();
        let mut expected_order: Vec<&str> = Vec::new();
        let mut last_dir = [0i64; 5];

        for (idx, asc) in &calls {
            let name = names[*idx];
            query = if *asc { query.asc_by(name) } else { query.desc_by(name) };
            if !expected_order.contains(&name) {
                expected_order.push(name);
            }
            last_dir[*idx] = if *asc { 1 } else { -1 };
        }

        let map = query.to_query_map().unwrap();
        let sort: Value = serde_json::from_str(&map["sort"]).unwrap();
        let object = sort.as_object().unwrap();

        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        prop_assert_eq!(&keys, &expected_order);
        for (key, dir) in object {
            let idx = names.iter().position(|n| n == key).unwrap();
            prop_assert_eq!(dir.as_i64(), Some(last_dir[idx]));
        }
    }

    /// Adding the same filter twice has no effect on the rendered map.
    #[test]
    fn duplicate_filters_collapse(filter in filter_strategy()) {
        let once = Query::new().filter(filter.clone());
        let twice = once.clone().filter(filter);
        prop_assert_eq!(once.to_query_map().unwrap(), twice.to_query_map().unwrap());
    }

    /// Filters on distinct fields merge to the union of their objects.
    #[test]
    fn distinct_field_filters_union(
        left in leaf_strategy(),
        right in leaf_strategy(),
    ) {
        prop_assume!(left.key() != right.key());
        let map = Query::new().filter(left.clone()).filter(right.clone()).to_query_map().unwrap();
        let merged: Value = serde_json::from_str(&map["filter"]).unwrap();
        let object = merged.as_object().unwrap();
        prop_assert_eq!(object.len(), 2);
        prop_assert_eq!(&object[left.key()], &left.to_value()[left.key()]);
        prop_assert_eq!(&object[right.key()], &right.to_value()[right.key()]);
    }
}
