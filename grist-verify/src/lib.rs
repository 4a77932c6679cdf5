//! Order-invariant comparison of columnar results.
//!
//! Group-by output order is unspecified, so direct positional comparison of
//! two result tables is not valid. The protocol is: compute a sort
//! permutation of the key columns with [`canonical_order`] (ascending, nulls
//! after), apply it to the key table and every result column with
//! [`canonicalize`] (or [`Table::gather`]), then compare with
//! [`tables_equal`]/[`columns_equal`].
//!
//! This crate is a first-class utility, not test scaffolding: any caller
//! that needs deterministic comparison of unordered group output goes
//! through it.

#![forbid(unsafe_code)]

use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::compute::{SortColumn, lexsort_to_indices, take};
use arrow::row::{RowConverter, SortField};
use grist_column::{NullOrder, Order, Table, sort_options};
use grist_result::{Error, Result};

/// Element-wise column equality.
///
/// Types and lengths must match. With `nulls_are_equal`, a null in both
/// operands at the same position counts as equal regardless of the
/// underlying don't-care value; without it, a null on either side at any
/// position fails the comparison.
pub fn columns_equal(expected: &ArrayRef, actual: &ArrayRef, nulls_are_equal: bool) -> bool {
    if expected.data_type() != actual.data_type() || expected.len() != actual.len() {
        return false;
    }
    if !nulls_are_equal && (expected.null_count() > 0 || actual.null_count() > 0) {
        return false;
    }
    let Ok(converter) = RowConverter::new(vec![SortField::new(expected.data_type().clone())])
    else {
        return false;
    };
    let Ok(expected_rows) = converter.convert_columns(std::slice::from_ref(expected)) else {
        return false;
    };
    let Ok(actual_rows) = converter.convert_columns(std::slice::from_ref(actual)) else {
        return false;
    };
    // Row encodings are canonical: null == null, values compare by content.
    (0..expected.len()).all(|row| expected_rows.row(row) == actual_rows.row(row))
}

/// Table equality: same column count and every column pair equal with
/// `nulls_are_equal = true`.
pub fn tables_equal(expected: &Table, actual: &Table) -> bool {
    expected.num_columns() == actual.num_columns()
        && expected
            .columns()
            .iter()
            .zip(actual.columns())
            .all(|(e, a)| columns_equal(e, a, true))
}

/// Lexicographic sort permutation of a table under per-column order and
/// null-precedence directives. Empty directive slices mean ascending /
/// nulls-after everywhere.
pub fn sorted_order(
    table: &Table,
    column_order: &[Order],
    null_precedence: &[NullOrder],
) -> Result<UInt32Array> {
    if table.num_columns() == 0 {
        return Ok(UInt32Array::from(Vec::<u32>::new()));
    }
    if !column_order.is_empty() && column_order.len() != table.num_columns() {
        return Err(Error::InvalidArgumentError(format!(
            "column_order has {} entries for {} columns",
            column_order.len(),
            table.num_columns()
        )));
    }
    if !null_precedence.is_empty() && null_precedence.len() != table.num_columns() {
        return Err(Error::InvalidArgumentError(format!(
            "null_precedence has {} entries for {} columns",
            null_precedence.len(),
            table.num_columns()
        )));
    }
    let sort_columns: Vec<SortColumn> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| SortColumn {
            values: column.clone(),
            options: Some(sort_options(
                column_order.get(idx).copied().unwrap_or(Order::Ascending),
                null_precedence.get(idx).copied().unwrap_or(NullOrder::After),
            )),
        })
        .collect();
    lexsort_to_indices(&sort_columns, None).map_err(Error::from)
}

/// The canonical permutation for unordered group output: every key column
/// ascending, nulls ordered after valid values.
pub fn canonical_order(table: &Table) -> Result<UInt32Array> {
    sorted_order(table, &[], &[])
}

/// Apply the canonical permutation of `keys` to the key table and to every
/// result column, producing directly comparable output.
pub fn canonicalize(keys: &Table, result_columns: &[ArrayRef]) -> Result<(Table, Vec<ArrayRef>)> {
    let order = canonical_order(keys)?;
    let keys = keys.gather(&order)?;
    let columns = result_columns
        .iter()
        .map(|column| take(column.as_ref(), &order, None).map_err(Error::from))
        .collect::<Result<Vec<_>>>()?;
    Ok((keys, columns))
}
