//! Dictionary-encoded columns.
//!
//! A [`DictionaryColumn`] splits a column into a `keys` sub-column holding
//! the distinct valid values in ascending order and a `UInt32` `indices`
//! sub-column mapping each row back to a key position. Row nullity lives on
//! the indices array's null buffer, so the null mask and null count always
//! travel together.
//!
//! Build one with [`encode`] from raw values, or with
//! [`DictionaryColumn::from_parts`] from caller-supplied keys and indices.

use arrow::array::{Array, ArrayRef, UInt32Array, new_null_array};
use arrow::compute::take;
use arrow::datatypes::DataType;
use grist_result::{Error, Result};

mod encode;

pub use encode::encode;

/// An immutable dictionary-encoded column.
///
/// Invariants, established at construction and never revisited:
/// - `keys` contains no nulls and is strictly ascending (hence unique);
/// - every index entry at a valid row is in `[0, keys.len())`;
/// - a null row's index slot is an arbitrary in-range value and is never
///   dereferenced.
///
/// `keys` and `indices` are owned by the dictionary column; `from_parts`
/// takes its source columns by value for that reason.
#[derive(Clone, Debug)]
pub struct DictionaryColumn {
    keys: ArrayRef,
    indices: UInt32Array,
}

impl DictionaryColumn {
    /// Construct from caller-supplied keys and indices, taking ownership of
    /// both.
    ///
    /// Fails with `InvalidArgumentError` if `keys` contains nulls or any
    /// valid index entry falls outside `[0, keys.len())`. That `keys` is
    /// sorted ascending and unique is a caller contract that is not
    /// re-verified; violating it yields wrong answers, not memory unsafety.
    pub fn from_parts(keys: ArrayRef, indices: UInt32Array) -> Result<Self> {
        if keys.null_count() != 0 {
            return Err(Error::InvalidArgumentError(
                "dictionary keys must not contain nulls".into(),
            ));
        }
        let key_count = keys.len() as u32;
        for row in 0..indices.len() {
            if indices.is_valid(row) && indices.value(row) >= key_count {
                return Err(Error::InvalidArgumentError(format!(
                    "dictionary index {} at row {} out of range [0, {})",
                    indices.value(row),
                    row,
                    key_count
                )));
            }
        }
        Ok(Self { keys, indices })
    }

    /// Number of rows (length of the indices sub-column).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of null rows.
    pub fn null_count(&self) -> usize {
        self.indices.null_count()
    }

    pub fn is_null(&self, row: usize) -> bool {
        self.indices.is_null(row)
    }

    /// Element type of the dictionary, i.e. the keys' data type.
    pub fn data_type(&self) -> &DataType {
        self.keys.data_type()
    }

    pub fn keys(&self) -> &ArrayRef {
        &self.keys
    }

    pub fn indices(&self) -> &UInt32Array {
        &self.indices
    }

    /// Materialize the dense form: `keys[indices[i]]` per row, with the
    /// dictionary's null pattern carried over.
    ///
    /// This is the representation handed to interchange collaborators, which
    /// never see the key/index split.
    pub fn decode(&self) -> Result<ArrayRef> {
        if self.keys.is_empty() {
            // Every row is null; there is no in-range slot to dereference.
            return Ok(new_null_array(self.keys.data_type(), self.indices.len()));
        }
        take(self.keys.as_ref(), &self.indices, None).map_err(Error::from)
    }
}
