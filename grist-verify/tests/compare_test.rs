use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray, UInt32Array};
use grist_column::{NullOrder, Order, Table};
use grist_verify::{canonical_order, canonicalize, columns_equal, sorted_order, tables_equal};

fn int_array(values: Vec<Option<i64>>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

#[test]
fn equal_columns_compare_equal() {
    let a = int_array(vec![Some(1), Some(2), Some(3)]);
    let b = int_array(vec![Some(1), Some(2), Some(3)]);
    assert!(columns_equal(&a, &b, true));
    assert!(columns_equal(&a, &b, false));
}

#[test]
fn differing_values_compare_unequal() {
    let a = int_array(vec![Some(1), Some(2)]);
    let b = int_array(vec![Some(1), Some(3)]);
    assert!(!columns_equal(&a, &b, true));
}

#[test]
fn differing_types_or_lengths_compare_unequal() {
    let a = int_array(vec![Some(1)]);
    let b: ArrayRef = Arc::new(StringArray::from(vec!["1"]));
    assert!(!columns_equal(&a, &b, true));

    let c = int_array(vec![Some(1), Some(2)]);
    assert!(!columns_equal(&a, &c, true));
}

#[test]
fn null_equality_is_governed_by_the_flag() {
    let a = int_array(vec![Some(1), None, Some(3)]);
    let b = int_array(vec![Some(1), None, Some(3)]);
    // Null == null only when the caller says so.
    assert!(columns_equal(&a, &b, true));
    assert!(!columns_equal(&a, &b, false));

    let c = int_array(vec![Some(1), Some(2), Some(3)]);
    assert!(!columns_equal(&a, &c, true));
}

#[test]
fn tables_equal_checks_every_column() {
    let t1 = Table::try_new(vec![
        int_array(vec![Some(1), Some(2)]),
        int_array(vec![None, Some(4)]),
    ])
    .unwrap();
    let t2 = Table::try_new(vec![
        int_array(vec![Some(1), Some(2)]),
        int_array(vec![None, Some(4)]),
    ])
    .unwrap();
    let t3 = Table::try_new(vec![int_array(vec![Some(1), Some(2)])]).unwrap();

    assert!(tables_equal(&t1, &t2));
    assert!(!tables_equal(&t1, &t3));
}

#[test]
fn canonical_order_sorts_ascending_nulls_after() {
    let table = Table::try_new(vec![int_array(vec![Some(5), None, Some(1), Some(3)])]).unwrap();
    let order = canonical_order(&table).unwrap();
    assert_eq!(order, UInt32Array::from(vec![2u32, 3, 0, 1]));
}

#[test]
fn sorted_order_honors_directives() {
    let table = Table::try_new(vec![int_array(vec![Some(5), None, Some(1), Some(3)])]).unwrap();
    let order = sorted_order(&table, &[Order::Descending], &[NullOrder::Before]).unwrap();
    assert_eq!(order, UInt32Array::from(vec![1u32, 0, 3, 2]));
}

#[test]
fn shuffled_group_output_matches_only_after_canonicalization() {
    // The same three groups emitted in two different orders.
    let keys_a = Table::try_new(vec![int_array(vec![Some(1), Some(2), Some(3)])]).unwrap();
    let sums_a = vec![int_array(vec![Some(10), Some(20), Some(30)])];
    let keys_b = Table::try_new(vec![int_array(vec![Some(3), Some(1), Some(2)])]).unwrap();
    let sums_b = vec![int_array(vec![Some(30), Some(10), Some(20)])];

    // Positional comparison of unordered output is not valid and fails here.
    assert!(!tables_equal(&keys_a, &keys_b));

    let (canon_keys_a, canon_sums_a) = canonicalize(&keys_a, &sums_a).unwrap();
    let (canon_keys_b, canon_sums_b) = canonicalize(&keys_b, &sums_b).unwrap();
    assert!(tables_equal(&canon_keys_a, &canon_keys_b));
    assert!(columns_equal(&canon_sums_a[0], &canon_sums_b[0], true));
}

#[test]
fn canonicalization_is_idempotent() {
    let keys = Table::try_new(vec![int_array(vec![Some(2), None, Some(1)])]).unwrap();
    let vals = vec![int_array(vec![Some(7), Some(8), Some(9)])];

    let (keys_once, vals_once) = canonicalize(&keys, &vals).unwrap();
    let (keys_twice, vals_twice) = canonicalize(&keys_once, &vals_once).unwrap();

    assert!(tables_equal(&keys_once, &keys_twice));
    assert!(columns_equal(&vals_once[0], &vals_twice[0], true));
}
