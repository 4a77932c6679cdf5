//! Group-by aggregation over a key table.
//!
//! A [`GroupBy`] instance binds one key table and one immutable
//! [`GroupByOptions`]; each [`GroupBy::aggregate`] call partitions the key
//! rows into groups by structural equality of the full key tuple and applies
//! every requested operator to the paired value columns.
//!
//! Group output order is intentionally unspecified (first-encounter order in
//! practice, but not contractual). Callers that need a fixed order apply the
//! canonicalization protocol from `grist-verify`; the engine never sorts
//! internally.

use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::row::{OwnedRow, RowConverter, SortField};
use grist_column::{NullOrder, Order, Table, sort_options};
use grist_result::{Error, Result};
use rustc_hash::FxHashMap;

mod aggregate;

pub use aggregate::AggregateKind;

/// One value column paired with the operators to compute over it.
///
/// A single request may carry several operators (e.g. SUM and COUNT); each
/// is computed once per group. An empty operator list is permitted and
/// yields an empty result-column list.
#[derive(Clone)]
pub struct AggregationRequest {
    pub values: ArrayRef,
    pub aggregations: Vec<AggregateKind>,
}

/// Result columns for one request, aligned by index with the request's
/// operator list. Each column has one entry per group.
#[derive(Clone, Debug)]
pub struct AggregationResult {
    pub columns: Vec<ArrayRef>,
}

/// Configuration for one [`GroupBy`] instance.
///
/// Empty `column_order`/`null_precedence` vectors mean ascending order and
/// nulls-after for every key column; non-empty vectors must match the
/// key-column count.
#[derive(Clone, Debug)]
pub struct GroupByOptions {
    /// When true, rows whose key tuple contains nulls form their own groups
    /// (null matches null within a key column). When false, any null in a
    /// key column excludes the row from every group.
    pub include_null_keys: bool,
    /// Caller assertion that the key table is already grouped contiguously
    /// in sorted order. The hash strategy used here never re-sorts, so the
    /// hint is recorded but has no effect on correctness.
    pub keys_pre_sorted: bool,
    pub column_order: Vec<Order>,
    pub null_precedence: Vec<NullOrder>,
}

impl Default for GroupByOptions {
    fn default() -> Self {
        Self {
            include_null_keys: false,
            keys_pre_sorted: false,
            column_order: Vec::new(),
            null_precedence: Vec::new(),
        }
    }
}

impl GroupByOptions {
    fn validate(&self, key_columns: usize) -> Result<()> {
        if !self.column_order.is_empty() && self.column_order.len() != key_columns {
            return Err(Error::InvalidArgumentError(format!(
                "column_order has {} entries for {} key columns",
                self.column_order.len(),
                key_columns
            )));
        }
        if !self.null_precedence.is_empty() && self.null_precedence.len() != key_columns {
            return Err(Error::InvalidArgumentError(format!(
                "null_precedence has {} entries for {} key columns",
                self.null_precedence.len(),
                key_columns
            )));
        }
        Ok(())
    }

    fn sort_options_for(&self, column: usize) -> arrow::compute::SortOptions {
        let order = self
            .column_order
            .get(column)
            .copied()
            .unwrap_or(Order::Ascending);
        let nulls = self
            .null_precedence
            .get(column)
            .copied()
            .unwrap_or(NullOrder::After);
        sort_options(order, nulls)
    }
}

/// A group-by engine bound to one key table.
///
/// The instance is immutable once built; every `aggregate` call is
/// independent. Sharing an instance across threads for concurrent
/// `aggregate` calls is safe because nothing is mutated.
#[derive(Debug)]
pub struct GroupBy {
    keys: Table,
    options: GroupByOptions,
}

impl GroupBy {
    pub fn new(keys: Table, options: GroupByOptions) -> Result<Self> {
        options.validate(keys.num_columns())?;
        Ok(Self { keys, options })
    }

    pub fn keys(&self) -> &Table {
        &self.keys
    }

    pub fn options(&self) -> &GroupByOptions {
        &self.options
    }

    /// Partition the key rows into groups and compute every requested
    /// aggregation.
    ///
    /// Returns the unique key table (one row per group, order unspecified)
    /// and one [`AggregationResult`] per request. Either the whole result is
    /// produced or an error is returned; no partial output escapes.
    pub fn aggregate(
        &self,
        requests: &[AggregationRequest],
    ) -> Result<(Table, Vec<AggregationResult>)> {
        for (idx, request) in requests.iter().enumerate() {
            if request.values.len() != self.keys.num_rows() {
                return Err(Error::InvalidArgumentError(format!(
                    "request {} has {} value rows, key table has {}",
                    idx,
                    request.values.len(),
                    self.keys.num_rows()
                )));
            }
        }

        let (group_ids, first_rows) = self.group_rows()?;
        let group_count = first_rows.len();
        let unique_keys = self.keys.gather(&UInt32Array::from(first_rows))?;

        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            let mut columns = Vec::with_capacity(request.aggregations.len());
            for kind in &request.aggregations {
                columns.push(aggregate::aggregate_groups(
                    &request.values,
                    *kind,
                    &group_ids,
                    group_count,
                )?);
            }
            results.push(AggregationResult { columns });
        }

        tracing::debug!(
            rows = self.keys.num_rows(),
            groups = group_count,
            requests = requests.len(),
            "aggregated key table"
        );

        Ok((unique_keys, results))
    }

    /// Map each key row to a group id (None for rows excluded by null keys)
    /// and record the first row of every group in encounter order.
    fn group_rows(&self) -> Result<(Vec<Option<usize>>, Vec<u32>)> {
        let row_count = self.keys.num_rows();
        let fields: Vec<SortField> = self
            .keys
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                SortField::new_with_options(
                    column.data_type().clone(),
                    self.options.sort_options_for(idx),
                )
            })
            .collect();
        let converter = RowConverter::new(fields)?;
        let rows = converter.convert_columns(self.keys.columns())?;

        let mut groups: FxHashMap<OwnedRow, usize> = FxHashMap::default();
        let mut group_ids: Vec<Option<usize>> = Vec::with_capacity(row_count);
        let mut first_rows: Vec<u32> = Vec::new();

        for row in 0..row_count {
            if !self.options.include_null_keys
                && self.keys.columns().iter().any(|column| column.is_null(row))
            {
                group_ids.push(None);
                continue;
            }
            let next = first_rows.len();
            let group = *groups.entry(rows.row(row).owned()).or_insert(next);
            if group == next {
                first_rows.push(row as u32);
            }
            group_ids.push(Some(group));
        }

        Ok((group_ids, first_rows))
    }
}
