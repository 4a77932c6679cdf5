use arrow::array::{ArrayRef, UInt32Array};
use arrow::compute::take;
use grist_result::{Error, Result};

/// An ordered collection of same-length columns.
///
/// Every column's length equals `row_count`; the constructor rejects
/// anything else. A table with zero columns has zero rows.
#[derive(Clone, Debug)]
pub struct Table {
    columns: Vec<ArrayRef>,
    row_count: usize,
}

impl Table {
    pub fn try_new(columns: Vec<ArrayRef>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        for (idx, column) in columns.iter().enumerate() {
            if column.len() != row_count {
                return Err(Error::InvalidArgumentError(format!(
                    "table column {} has {} rows, expected {}",
                    idx,
                    column.len(),
                    row_count
                )));
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn num_rows(&self) -> usize {
        self.row_count
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column at position `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of bounds, matching `RecordBatch::column`.
    pub fn column(&self, idx: usize) -> &ArrayRef {
        &self.columns[idx]
    }

    pub fn columns(&self) -> &[ArrayRef] {
        &self.columns
    }

    /// Apply a row permutation (or selection) to every column.
    ///
    /// The output has one row per index entry; a null index entry yields a
    /// null row in every column.
    pub fn gather(&self, indices: &UInt32Array) -> Result<Table> {
        let columns = self
            .columns
            .iter()
            .map(|column| take(column.as_ref(), indices, None).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;
        Table::try_new(columns)
    }
}
