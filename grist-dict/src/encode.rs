use arrow::array::{Array, ArrayRef, UInt32Builder};
use arrow::row::{OwnedRow, RowConverter, SortField};
use grist_result::{Error, Result};
use rustc_hash::FxHashMap;

use crate::DictionaryColumn;

/// Dictionary-encode a column.
///
/// The distinct valid values of `column`, sorted ascending, become the key
/// set; each valid row's index entry is the position of its value within
/// that set. Null rows contribute no key: they are null in the output's
/// null buffer and carry an arbitrary in-range index slot. The null count
/// is preserved unchanged.
///
/// Internally this hashes first and sorts the distinct set afterwards; only
/// the final sorted-unique property is contractual.
pub fn encode(column: &ArrayRef) -> Result<DictionaryColumn> {
    let converter = RowConverter::new(vec![SortField::new(column.data_type().clone())])?;
    let rows = converter.convert_columns(std::slice::from_ref(column))?;

    // First pass: assign provisional codes in first-encounter order.
    let mut distinct: FxHashMap<OwnedRow, u32> = FxHashMap::default();
    let mut provisional: Vec<u32> = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        if column.is_valid(row) {
            let next = u32::try_from(distinct.len()).map_err(|_| {
                Error::Internal("dictionary key count exceeds u32 range".into())
            })?;
            let code = *distinct.entry(rows.row(row).owned()).or_insert(next);
            provisional.push(code);
        } else {
            // Slot value for a null row; contents are ignored.
            provisional.push(0);
        }
    }

    // Order the distinct set; row encodings sort like the source values.
    let mut ordered: Vec<(OwnedRow, u32)> = distinct.into_iter().collect();
    ordered.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut remap = vec![0u32; ordered.len()];
    for (sorted_code, (_, provisional_code)) in ordered.iter().enumerate() {
        remap[*provisional_code as usize] = sorted_code as u32;
    }

    let keys = converter
        .convert_rows(ordered.iter().map(|(row, _)| row.row()))?
        .into_iter()
        .next()
        .ok_or_else(|| Error::Internal("row converter produced no key column".into()))?;

    let mut indices = UInt32Builder::with_capacity(column.len());
    for row in 0..column.len() {
        if column.is_valid(row) {
            indices.append_value(remap[provisional[row] as usize]);
        } else {
            indices.append_null();
        }
    }
    let indices = indices.finish();

    tracing::debug!(
        rows = column.len(),
        keys = keys.len(),
        nulls = indices.null_count(),
        "encoded dictionary column"
    );

    Ok(DictionaryColumn { keys, indices })
}
