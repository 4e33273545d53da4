//! Behavior of the collection operations on realistic data.

use sheaf::{
    Collection, Dir, Equality, Field, Key, Needle, Number, Pagination, SheafError, SortMode, Value,
};
use serde_json::json;
use sheaf_macros::Fields;

#[derive(Debug, Clone, PartialEq, Fields)]
struct Customer {
    #[field]
    id: i64,
    #[field]
    age: i64,
}

fn customer(id: i64, age: i64) -> Customer {
    Customer { id, age }
}

fn keys<V>(collection: &Collection<V>) -> Vec<Key> {
    collection.iter().map(|(key, _)| key.clone()).collect()
}

fn mixed_keys() -> Collection<&'static str> {
    Collection::from([
        (Key::Int(0), "a"),
        (Key::from("b"), "c"),
        (Key::Int(1), "test"),
    ])
}

// ============================================================================
// Construction and access
// ============================================================================

#[test]
fn iteration_follows_storage_order() {
    let customers = Collection::from(vec![customer(1, 0), customer(2, 0), customer(3, 0)]);
    let mut seen = 0;
    for (position, (key, model)) in customers.iter().enumerate() {
        assert_eq!(key, &Key::Int(position as i64));
        assert_eq!(model.id, position as i64 + 1);
        seen += 1;
    }
    assert_eq!(seen, 3);

    // Iteration restarts from the beginning every time.
    assert_eq!(customers.iter().count(), 3);
}

#[test]
fn read_by_int_and_named_keys() {
    let positional = Collection::from(vec![customer(1, 0), customer(2, 0), customer(3, 0)]);
    assert!(positional.contains_key(0));
    assert_eq!(positional[2].id, 3);
    assert!(!positional.contains_key(3));

    let named = Collection::from([
        ("one", customer(1, 0)),
        ("two", customer(2, 0)),
        ("three", customer(3, 0)),
    ]);
    assert_eq!(named["one"].id, 1);
    assert_eq!(named.get("three").map(|c| c.id), Some(3));
    assert!(named.get("four").is_none());
}

#[test]
fn absent_key_is_distinct_from_null_value() {
    let c = Collection::from([("present", Value::Null)]);
    assert_eq!(c.get("present"), Some(&Value::Null));
    assert_eq!(c.get("absent"), None);
    match c.try_get("absent") {
        Err(SheafError::KeyNotFound(key)) => assert_eq!(key, Key::from("absent")),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "no entry found for key four")]
fn indexing_absent_key_panics() {
    let c = Collection::from([("one", 1)]);
    let _value = c["four"];
}

#[test]
fn cells_write_and_unset() {
    let mut c = Collection::from(vec![1, 2, 3]);
    c.cells().set("three", 4);
    assert_eq!(c["three"], 4);

    let mut c = Collection::from(vec![1, 2, 3]);
    let appended = c.cells().push(9);
    assert_eq!(appended, Key::Int(3));
    assert_eq!(c[3], 9);

    let mut c = Collection::from(vec![1, 2, 3]);
    assert_eq!(c.cells().unset(1), Some(2));
    assert_eq!(c.cells().unset(1), None);
    assert_eq!(keys(&c), vec![Key::Int(0), Key::Int(2)]);
    assert_eq!(c.to_vec(), vec![1, 3]);
}

#[test]
fn counting() {
    let empty: Collection<i32> = Collection::new();
    assert!(empty.is_empty());
    assert_eq!(empty.count(), 0);

    let c = Collection::from(vec![customer(1, 0), customer(2, 0), customer(3, 0)]);
    assert!(!c.is_empty());
    assert_eq!(c.count(), 3);
    assert_eq!(c.len(), 3);
}

// ============================================================================
// map / filter / reduce
// ============================================================================

#[test]
fn map_keeps_keys() {
    let c = Collection::from([("a", customer(1, 0)), ("b", customer(2, 0))]);
    assert_eq!(c.map(|m| m.id), Collection::from([("a", 1), ("b", 2)]));
}

#[test]
fn filter_on_value_and_key() {
    let c = Collection::from(vec![customer(1, 0), customer(2, 0), customer(3, 0)]);

    let two = c.filter(|m, _| m.id == 2).map(|m| m.id);
    assert_eq!(two, Collection::from([(1, 2)]));

    let tail = c.filter(|_, key| key.as_int() != Some(0)).map(|m| m.id);
    assert_eq!(tail, Collection::from([(1, 2), (2, 3)]));
}

#[test]
fn reduce_with_seed_and_default() {
    let c = Collection::from(vec![customer(1, 0), customer(2, 0), customer(3, 0)]);
    assert_eq!(c.reduce(6, |carry, m| carry + m.id), 12);
    assert_eq!(c.reduce_default(|carry: i64, m| carry + m.id), 6);
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn sum_min_max_over_fields() {
    let empty: Collection<Customer> = Collection::new();
    assert_eq!(empty.sum(Customer::ID), Number::I64(0));
    assert_eq!(empty.min(Customer::AGE), Value::from(0));
    assert_eq!(empty.max(Customer::AGE), Value::from(0));

    let c = Collection::from(vec![customer(1, -2), customer(2, 2), customer(3, 42)]);
    assert_eq!(c.sum(Customer::ID), Number::I64(6));
    assert_eq!(c.sum(Customer::AGE), Number::I64(42));
    assert_eq!(c.min(Customer::ID), Value::from(1));
    assert_eq!(c.min(Customer::AGE), Value::from(-2));
    assert_eq!(c.max(Customer::ID), Value::from(3));
    assert_eq!(c.max(Customer::AGE), Value::from(42));
}

#[test]
fn aggregates_over_values_themselves() {
    let c = Collection::from(vec![-2, 1, 3]);
    assert_eq!(c.sum(Field::Itself), Number::I64(2));
    assert_eq!(c.min(Field::Itself), Value::from(-2));
    assert_eq!(c.max(Field::Itself), Value::from(3));
}

#[test]
fn aggregates_treat_missing_fields_as_zero() {
    let c = Collection::from(vec![customer(1, 5), customer(2, 7)]);
    assert_eq!(c.sum("missing"), Number::I64(0));
    assert_eq!(c.max("missing"), Value::from(0));
}

// ============================================================================
// keys / values / flip / reverse / merge
// ============================================================================

#[test]
fn keys_values_flip_reverse() {
    let c = mixed_keys();

    assert_eq!(
        c.keys().to_vec(),
        vec![Key::Int(0), Key::from("b"), Key::Int(1)]
    );
    assert_eq!(c.values().to_items(), vec![
        (Key::Int(0), "a"),
        (Key::Int(1), "c"),
        (Key::Int(2), "test"),
    ]);
    assert_eq!(
        c.flip(),
        Collection::from([
            ("a", Key::Int(0)),
            ("c", Key::from("b")),
            ("test", Key::Int(1)),
        ])
    );
    assert_eq!(
        c.reverse(),
        Collection::from([
            (Key::Int(1), "test"),
            (Key::from("b"), "c"),
            (Key::Int(0), "a"),
        ])
    );
}

#[test]
fn flip_skips_values_that_cannot_be_keys() {
    let c = Collection::from(vec![Value::from("x"), Value::from(1.5), Value::Null]);
    assert_eq!(c.flip(), Collection::from([("x", Key::Int(0))]));
}

#[test]
fn merge_renumbers_positions() {
    let letters = Collection::from(vec!["a", "b", "c"]);
    let digits = Collection::from(vec!["1", "2", "3"]);
    assert_eq!(
        letters.merge(&digits).to_vec(),
        vec!["a", "b", "c", "1", "2", "3"]
    );
    assert_eq!(
        digits.merge(&letters).to_vec(),
        vec!["1", "2", "3", "a", "b", "c"]
    );
    assert_eq!(
        keys(&letters.merge(&digits)),
        (0..6).map(Key::Int).collect::<Vec<_>>()
    );
}

#[test]
fn merge_named_keys_later_wins() {
    let left = Collection::from([("a", 1), ("b", 2)]);
    let right = Collection::from([("a", 3), ("c", 4)]);
    assert_eq!(
        left.merge(&right),
        Collection::from([("a", 3), ("b", 2), ("c", 4)])
    );
}

// ============================================================================
// remap / index_by / group_by
// ============================================================================

#[test]
fn remap_by_name() {
    let c = Collection::from(vec![customer(1, -2), customer(2, 2), customer(3, 42)]);
    assert_eq!(
        c.remap(Customer::ID, Customer::AGE),
        Collection::from([(1, Value::from(-2)), (2, Value::from(2)), (3, Value::from(42))])
    );
}

#[test]
fn remap_by_accessor() {
    let c = Collection::from(vec![customer(1, -2), customer(2, 2), customer(3, 42)]);
    let from = Field::with(|m: &Customer| Value::from(format!("{}{}", m.id, m.age)));
    let to = Field::with(|m: &Customer| Value::from(m.id + m.age));

    let remapped = c.remap(from, to);
    assert_eq!(
        keys(&remapped),
        vec![Key::from("1-2"), Key::Int(22), Key::Int(342)]
    );
    assert_eq!(
        remapped.to_vec(),
        vec![Value::from(-1), Value::from(4), Value::from(45)]
    );
}

#[test]
fn index_by_field() {
    let models = vec![customer(1, -2), customer(2, 2), customer(3, 42)];
    let c = Collection::from(models.clone());
    assert_eq!(
        c.index_by(Customer::ID),
        Collection::from([
            (1, models[0].clone()),
            (2, models[1].clone()),
            (3, models[2].clone()),
        ])
    );
}

#[test]
fn group_by_with_and_without_keys() {
    let (a, b, c) = (customer(1, 2), customer(2, 2), customer(3, 42));
    let models = Collection::from([(1, a.clone()), (2, b.clone()), (3, c.clone())]);

    let by_age = models.group_by(Customer::AGE, true);
    assert_eq!(keys(&by_age), vec![Key::Int(2), Key::Int(42)]);
    assert_eq!(by_age[2], Collection::from([(1, a.clone()), (2, b.clone())]));
    assert_eq!(by_age[42], Collection::from([(3, c.clone())]));

    let by_age = models.group_by(Customer::AGE, false);
    assert_eq!(by_age[2], Collection::from(vec![a.clone(), b.clone()]));
    assert_eq!(by_age[42], Collection::from(vec![c.clone()]));

    let by_id = models.group_by(Customer::ID, false);
    assert_eq!(by_id.count(), 3);
    assert_eq!(by_id[3], Collection::from(vec![c]));
}

// ============================================================================
// contains / remove / replace
// ============================================================================

#[test]
fn contains_exact_and_coercive() {
    let c = Collection::from(vec![1, 2, 3, 4, 5, 6]);

    assert!(c.contains(1, Equality::Coercive));
    assert!(c.contains("1", Equality::Coercive));
    assert!(c.contains(1, Equality::Exact));
    assert!(!c.contains("1", Equality::Exact));

    for equality in [Equality::Coercive, Equality::Exact] {
        assert!(!c.contains(8, equality));
        assert!(!c.contains("8", equality));
        assert!(!c.contains(Needle::when(|i: &i32| *i > 6), equality));
        assert!(c.contains(Needle::when(|i: &i32| *i > 5), equality));
    }
}

#[test]
fn remove_exact_and_coercive() {
    let c = Collection::from(vec![1, 2, 3, 4, 5, 6]);
    let everything = vec![1, 2, 3, 4, 5, 6];

    assert_eq!(c.remove(3, Equality::Coercive).to_vec(), vec![1, 2, 4, 5, 6]);
    assert_eq!(c.remove("3", Equality::Coercive).to_vec(), vec![1, 2, 4, 5, 6]);
    assert_eq!(c.remove(3, Equality::Exact).to_vec(), vec![1, 2, 4, 5, 6]);
    assert_eq!(c.remove("3", Equality::Exact).to_vec(), everything);
    assert_eq!(c.remove(7, Equality::Coercive).to_vec(), everything);
    assert_eq!(c.remove("7", Equality::Exact).to_vec(), everything);

    let small = c.remove(Needle::when(|i: &i32| *i > 3), Equality::Exact);
    assert_eq!(small, Collection::from(vec![1, 2, 3]));

    // Survivors keep their keys.
    assert_eq!(keys(&c.remove(2, Equality::Exact))[1], Key::Int(2));
}

#[test]
fn replace_exact_and_coercive() {
    let c = Collection::from(vec![1, 2, 3, 4, 3, 6]);
    let untouched = vec![1, 2, 3, 4, 3, 6];

    assert_eq!(c.replace(3, 9, Equality::Coercive).to_vec(), vec![1, 2, 9, 4, 9, 6]);
    assert_eq!(c.replace("3", 9, Equality::Coercive).to_vec(), vec![1, 2, 9, 4, 9, 6]);
    assert_eq!(c.replace(3, 9, Equality::Exact).to_vec(), vec![1, 2, 9, 4, 9, 6]);
    assert_eq!(c.replace("3", 9, Equality::Exact).to_vec(), untouched);
    assert_eq!(c.replace(7, 9, Equality::Coercive).to_vec(), untouched);
    assert_eq!(c.replace("7", 9, Equality::Exact).to_vec(), untouched);
}

#[test]
fn coercive_matching_of_strings() {
    let c = Collection::from(vec!["1e1", "abc", ""]);
    assert!(c.contains(10, Equality::Coercive));
    assert!(!c.contains(10, Equality::Exact));
    assert!(c.contains(Value::Null, Equality::Coercive));
    assert!(!c.contains(Value::Null, Equality::Exact));
}

#[test]
fn records_never_equal_scalars() {
    let records = Collection::from(vec![customer(0, 0), customer(1, 30)]);
    for needle in [Value::Null, Value::from(0), Value::from(false), Value::from("")] {
        for equality in [Equality::Coercive, Equality::Exact] {
            assert!(!records.contains(needle.clone(), equality));
            assert_eq!(records.remove(needle.clone(), equality), records);
            assert_eq!(records.replace(needle.clone(), customer(9, 9), equality), records);
        }
    }

    let minors = records.remove(Needle::when(|c: &Customer| c.age >= 18), Equality::Exact);
    assert_eq!(minors.to_vec(), vec![customer(0, 0)]);
}

#[test]
fn json_containers_never_equal_scalars() {
    let docs = Collection::from(vec![json!({"a": 1}), json!([1, 2]), json!("x")]);
    assert!(!docs.contains("", Equality::Coercive));
    assert!(!docs.contains(0, Equality::Coercive));
    assert!(!docs.contains(Value::Null, Equality::Exact));
    assert_eq!(docs.remove(false, Equality::Coercive), docs);

    let replaced = docs.replace("x", json!("y"), Equality::Exact);
    assert_eq!(replaced[0], json!({"a": 1}));
    assert_eq!(replaced[2], json!("y"));
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn sort_by_value() {
    let c = Collection::from(vec![4, 6, 5, 8, 11, 1]);
    assert_eq!(
        c.sort(Dir::Asc, SortMode::Regular).to_vec(),
        vec![1, 4, 5, 6, 8, 11]
    );
    assert_eq!(
        c.sort(Dir::Asc, SortMode::String).to_vec(),
        vec![1, 11, 4, 5, 6, 8]
    );
    assert_eq!(
        c.sort(Dir::Desc, SortMode::Regular).to_vec(),
        vec![11, 8, 6, 5, 4, 1]
    );
    assert_eq!(
        c.sort(Dir::Desc, SortMode::String).to_vec(),
        vec![8, 6, 5, 4, 11, 1]
    );

    // Keys travel with their values.
    assert_eq!(keys(&c.sort(Dir::Asc, SortMode::Regular))[0], Key::Int(5));
}

#[test]
fn sort_by_key() {
    let c = Collection::from([(5, 4), (44, 55), (55, 44), (4, 5)]);
    assert_eq!(
        c.sort_by_key(Dir::Asc, SortMode::Regular),
        Collection::from([(4, 5), (5, 4), (44, 55), (55, 44)])
    );
    assert_eq!(
        c.sort_by_key(Dir::Asc, SortMode::String),
        Collection::from([(4, 5), (44, 55), (5, 4), (55, 44)])
    );
    assert_eq!(
        c.sort_by_key(Dir::Desc, SortMode::Regular),
        Collection::from([(55, 44), (44, 55), (5, 4), (4, 5)])
    );
    assert_eq!(
        c.sort_by_key(Dir::Desc, SortMode::String),
        Collection::from([(55, 44), (5, 4), (44, 55), (4, 5)])
    );
}

#[test]
fn sort_natural() {
    let c = Collection::from(vec!["100.", "1.", "11.", "2."]);
    assert_eq!(c.sort_natural(false).to_vec(), vec!["1.", "2.", "11.", "100."]);
    assert_eq!(c.sort_natural(true).to_vec(), vec!["1.", "2.", "11.", "100."]);

    let c = Collection::from(vec!["anti", "Auto", "Zett", "beta"]);
    assert_eq!(c.sort_natural(false).to_vec(), vec!["anti", "Auto", "beta", "Zett"]);
    assert_eq!(c.sort_natural(true).to_vec(), vec!["Auto", "Zett", "anti", "beta"]);
}

#[test]
fn sort_by_fields() {
    let c = Collection::from([
        (2, customer(2, 42)),
        (1, customer(1, 2)),
        (3, customer(3, 2)),
    ]);
    let ids = |sorted: Collection<Customer>| sorted.map(|m| m.id).to_vec();

    let by_id = c.sort_by(Customer::ID, Dir::Asc, SortMode::Regular).unwrap();
    assert_eq!(keys(&by_id), vec![Key::Int(0), Key::Int(1), Key::Int(2)]);
    assert_eq!(ids(by_id), vec![1, 2, 3]);

    let desc = c.sort_by(Customer::ID, Dir::Desc, SortMode::Regular).unwrap();
    assert_eq!(ids(desc), vec![3, 2, 1]);

    let age_then_id = c
        .sort_by([Customer::AGE, Customer::ID], Dir::Asc, SortMode::Regular)
        .unwrap();
    assert_eq!(ids(age_then_id), vec![1, 3, 2]);

    let mixed = c
        .sort_by(
            [Customer::AGE, Customer::ID],
            [Dir::Asc, Dir::Desc],
            SortMode::Regular,
        )
        .unwrap();
    assert_eq!(ids(mixed), vec![3, 1, 2]);
}

#[test]
fn sort_by_rejects_mismatched_settings() {
    let c = Collection::from(vec![customer(1, 2)]);

    let err = c
        .sort_by(
            ["age", "id"],
            [Dir::Asc],
            [SortMode::Regular, SortMode::Regular],
        )
        .unwrap_err();
    assert!(matches!(err, SheafError::Configuration { .. }));
    assert_eq!(
        err.to_string(),
        "invalid sort directions: expected 2 entries, one per sort key, got 1 entries"
    );

    assert!(c
        .sort_by(["age", "id"], Dir::Asc, [SortMode::Numeric; 3])
        .is_err());
}

#[test]
fn sort_by_accessor() {
    let c = Collection::from(vec![customer(1, 30), customer(2, 10), customer(3, 20)]);
    let negated = Field::with(|m: &Customer| Value::from(-m.age));
    let sorted = c.sort_by(negated, Dir::Asc, SortMode::Numeric).unwrap();
    assert_eq!(sorted.map(|m| m.id).to_vec(), vec![1, 3, 2]);
}

// ============================================================================
// slice / paginate
// ============================================================================

#[test]
fn slice_windows() {
    let c = Collection::from(vec![1, 2, 3, 4, 5]);
    assert_eq!(c.slice(3, None, true), Collection::from([(3, 4), (4, 5)]));
    assert_eq!(c.slice(3, Some(1), true), Collection::from([(3, 4)]));
    assert_eq!(c.slice(0, Some(2), true), Collection::from(vec![1, 2]));
    assert_eq!(c.slice(1, Some(2), true), Collection::from([(1, 2), (2, 3)]));
    assert_eq!(c.slice(1, Some(2), false), Collection::from(vec![2, 3]));
    assert_eq!(c.slice(-2, None, true), Collection::from([(3, 4), (4, 5)]));
    assert!(c.slice(9, None, true).is_empty());
}

#[test]
fn paginate_pages() {
    let c = Collection::from(vec![1, 2, 3, 4, 5]);

    let pages = Pagination::new(c.count(), 3);
    assert_eq!(c.paginate(pages, false), Collection::from(vec![1, 2, 3]));
    assert_eq!(
        c.paginate(pages.with_page(1), false),
        Collection::from(vec![4, 5])
    );
    assert_eq!(
        c.paginate(pages.with_page(1), true),
        Collection::from([(3, 4), (4, 5)])
    );

    let unbounded = Pagination::new(c.count(), -1);
    assert_eq!(c.paginate(&unbounded, false), c);
}
