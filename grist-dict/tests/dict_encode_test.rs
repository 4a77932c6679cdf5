use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, StringArray, UInt32Array};
use grist_dict::{DictionaryColumn, encode};
use grist_result::Error;
use grist_verify::columns_equal;

fn int_column(values: Vec<Option<i64>>) -> ArrayRef {
    Arc::new(Int64Array::from(values))
}

#[test]
fn encode_builds_sorted_unique_keys() {
    let column: ArrayRef = Arc::new(Int64Array::from(vec![429, 111, 213, 111, 213, 429, 213]));
    let dict = encode(&column).unwrap();

    let keys = dict.keys().as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(keys.values(), &[111, 213, 429]);
    assert_eq!(dict.keys().null_count(), 0);

    assert_eq!(dict.indices().values(), &[2, 0, 1, 0, 1, 2, 1]);
    assert_eq!(dict.null_count(), 0);
    assert_eq!(dict.len(), 7);
}

#[test]
fn from_parts_decodes_with_supplied_keys() {
    let keys: ArrayRef = Arc::new(StringArray::from(vec!["a", "c", "d"]));
    let indices = UInt32Array::from(vec![1u32, 0, 0, 2, 2]);
    let dict = DictionaryColumn::from_parts(keys, indices).unwrap();

    let decoded = dict.decode().unwrap();
    let decoded = decoded.as_any().downcast_ref::<StringArray>().unwrap();
    let got: Vec<&str> = (0..decoded.len()).map(|i| decoded.value(i)).collect();
    assert_eq!(got, vec!["c", "a", "a", "d", "d"]);
}

#[test]
fn round_trip_preserves_values_and_null_pattern() {
    let column = int_column(vec![
        Some(7),
        None,
        Some(3),
        Some(7),
        None,
        Some(-2),
        Some(3),
    ]);
    let dict = encode(&column).unwrap();
    assert_eq!(dict.null_count(), 2);

    let decoded = dict.decode().unwrap();
    assert!(columns_equal(&column, &decoded, true));
}

#[test]
fn round_trip_preserves_string_columns() {
    let column: ArrayRef = Arc::new(StringArray::from(vec![
        Some("pear"),
        Some("apple"),
        None,
        Some("apple"),
        Some("banana"),
    ]));
    let dict = encode(&column).unwrap();

    let keys = dict.keys().as_any().downcast_ref::<StringArray>().unwrap();
    let got: Vec<&str> = (0..keys.len()).map(|i| keys.value(i)).collect();
    assert_eq!(got, vec!["apple", "banana", "pear"]);

    let decoded = dict.decode().unwrap();
    assert!(columns_equal(&column, &decoded, true));
}

#[test]
fn null_rows_stay_null_and_valid_indices_stay_in_range() {
    let column = int_column(vec![Some(5), None, Some(5), None, Some(1)]);
    let dict = encode(&column).unwrap();

    assert_eq!(dict.null_count(), 2);
    assert!(dict.is_null(1));
    assert!(dict.is_null(3));

    // Only the valid rows' indices are contractual; null slots hold any
    // in-range value and are never read.
    let key_count = dict.keys().len() as u32;
    for row in 0..dict.len() {
        if dict.indices().is_valid(row) {
            assert!(dict.indices().value(row) < key_count);
        }
    }
}

#[test]
fn keys_are_strictly_ascending() {
    let column = int_column(vec![Some(9), Some(-4), Some(0), Some(9), Some(-4)]);
    let dict = encode(&column).unwrap();
    let keys = dict.keys().as_any().downcast_ref::<Int64Array>().unwrap();
    for i in 1..keys.len() {
        assert!(keys.value(i - 1) < keys.value(i));
    }
}

#[test]
fn encode_empty_column() {
    let column = int_column(vec![]);
    let dict = encode(&column).unwrap();
    assert_eq!(dict.len(), 0);
    assert_eq!(dict.keys().len(), 0);
    assert_eq!(dict.decode().unwrap().len(), 0);
}

#[test]
fn encode_all_null_column() {
    let column = int_column(vec![None, None, None]);
    let dict = encode(&column).unwrap();
    assert_eq!(dict.keys().len(), 0);
    assert_eq!(dict.null_count(), 3);

    let decoded = dict.decode().unwrap();
    assert_eq!(decoded.null_count(), 3);
    assert!(columns_equal(&column, &decoded, true));
}

#[test]
fn from_parts_rejects_null_keys() {
    let keys: ArrayRef = Arc::new(Int64Array::from(vec![Some(1), None, Some(3)]));
    let indices = UInt32Array::from(vec![0u32, 1, 2]);
    let err = DictionaryColumn::from_parts(keys, indices).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(_)));
}

#[test]
fn from_parts_rejects_out_of_range_indices() {
    let keys: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
    let indices = UInt32Array::from(vec![0u32, 3, 1]);
    let err = DictionaryColumn::from_parts(keys, indices).unwrap_err();
    assert!(matches!(err, Error::InvalidArgumentError(_)));
}

#[test]
fn from_parts_ignores_null_index_slots() {
    let keys: ArrayRef = Arc::new(Int64Array::from(vec![10, 20]));
    let indices = UInt32Array::from(vec![Some(1u32), None, Some(0)]);
    let dict = DictionaryColumn::from_parts(keys, indices).unwrap();
    assert_eq!(dict.null_count(), 1);

    let decoded = dict.decode().unwrap();
    let expected = int_column(vec![Some(20), None, Some(10)]);
    assert!(columns_equal(&expected, &decoded, true));
}
