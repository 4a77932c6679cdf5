use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, Float64Builder, Int64Array, Int64Builder, UInt32Array,
    UInt64Builder,
};
use arrow::compute::take;
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type,
    Int64Type, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use arrow::row::{RowConverter, SortField};
use grist_result::{Error, Result};

/// Aggregation operator, dispatched per value-column type at execution time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregateKind {
    /// Valid (non-null) values per group. Output: `Int64`.
    Count,
    /// Null entries per group. Output: `Int64`.
    CountNulls,
    /// Sum of valid values. Signed integers produce `Int64`, unsigned
    /// `UInt64`, floats `Float64`; null when the group has no valid value.
    Sum,
    /// Smallest valid value, same type as the input; null when the group has
    /// no valid value.
    Min,
    /// Largest valid value, same type as the input.
    Max,
    /// Arithmetic mean of valid values as `Float64`.
    Mean,
    /// Value at the group's first row in original row order, nulls included.
    First,
    /// Value at the group's last row in original row order, nulls included.
    Last,
}

/// Compute one operator over every group.
///
/// `group_ids[i]` is the group of value row `i`, or `None` for rows excluded
/// from grouping. Rows are visited in original order, which `First`/`Last`
/// rely on.
pub(crate) fn aggregate_groups(
    values: &ArrayRef,
    kind: AggregateKind,
    group_ids: &[Option<usize>],
    group_count: usize,
) -> Result<ArrayRef> {
    match kind {
        AggregateKind::Count => Ok(grouped_count(values, group_ids, group_count, false)),
        AggregateKind::CountNulls => Ok(grouped_count(values, group_ids, group_count, true)),
        AggregateKind::Sum => grouped_sum(values, group_ids, group_count),
        AggregateKind::Min => grouped_min_max(values, group_ids, group_count, false),
        AggregateKind::Max => grouped_min_max(values, group_ids, group_count, true),
        AggregateKind::Mean => grouped_mean(values, group_ids, group_count),
        AggregateKind::First => grouped_first_last(values, group_ids, group_count, false),
        AggregateKind::Last => grouped_first_last(values, group_ids, group_count, true),
    }
}

fn grouped_count(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
    count_nulls: bool,
) -> ArrayRef {
    let mut counts = vec![0i64; group_count];
    for (row, group) in group_ids.iter().enumerate() {
        let Some(group) = group else { continue };
        if values.is_null(row) == count_nulls {
            counts[*group] += 1;
        }
    }
    Arc::new(Int64Array::from(counts))
}

fn grouped_sum(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
) -> Result<ArrayRef> {
    match values.data_type() {
        DataType::Int8 => sum_signed::<Int8Type>(values, group_ids, group_count),
        DataType::Int16 => sum_signed::<Int16Type>(values, group_ids, group_count),
        DataType::Int32 => sum_signed::<Int32Type>(values, group_ids, group_count),
        DataType::Int64 => sum_signed::<Int64Type>(values, group_ids, group_count),
        DataType::UInt8 => sum_unsigned::<UInt8Type>(values, group_ids, group_count),
        DataType::UInt16 => sum_unsigned::<UInt16Type>(values, group_ids, group_count),
        DataType::UInt32 => sum_unsigned::<UInt32Type>(values, group_ids, group_count),
        DataType::UInt64 => sum_unsigned::<UInt64Type>(values, group_ids, group_count),
        DataType::Float32 => {
            mean_or_sum_float::<Float32Type, _>(values, group_ids, group_count, false, |v| {
                v as f64
            })
        }
        DataType::Float64 => {
            mean_or_sum_float::<Float64Type, _>(values, group_ids, group_count, false, |v| v)
        }
        other => Err(Error::UnsupportedAggregation(format!(
            "SUM over {other} values"
        ))),
    }
}

fn grouped_mean(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
) -> Result<ArrayRef> {
    match values.data_type() {
        DataType::Int8 => {
            mean_or_sum_float::<Int8Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::Int16 => {
            mean_or_sum_float::<Int16Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::Int32 => {
            mean_or_sum_float::<Int32Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::Int64 => {
            mean_or_sum_float::<Int64Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::UInt8 => {
            mean_or_sum_float::<UInt8Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::UInt16 => {
            mean_or_sum_float::<UInt16Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::UInt32 => {
            mean_or_sum_float::<UInt32Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::UInt64 => {
            mean_or_sum_float::<UInt64Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::Float32 => {
            mean_or_sum_float::<Float32Type, _>(values, group_ids, group_count, true, |v| v as f64)
        }
        DataType::Float64 => {
            mean_or_sum_float::<Float64Type, _>(values, group_ids, group_count, true, |v| v)
        }
        other => Err(Error::UnsupportedAggregation(format!(
            "MEAN over {other} values"
        ))),
    }
}

fn sum_signed<T>(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
) -> Result<ArrayRef>
where
    T: ArrowPrimitiveType,
    T::Native: Into<i128>,
{
    let array = values.as_primitive::<T>();
    let mut totals = vec![0i128; group_count];
    let mut saw_value = vec![false; group_count];
    for (row, group) in group_ids.iter().enumerate() {
        let Some(group) = group else { continue };
        if array.is_valid(row) {
            totals[*group] += Into::<i128>::into(array.value(row));
            saw_value[*group] = true;
        }
    }
    let mut builder = Int64Builder::with_capacity(group_count);
    for group in 0..group_count {
        if saw_value[group] {
            let total = i64::try_from(totals[group]).map_err(|_| {
                Error::InvalidArgumentError("SUM result exceeds i64 range".into())
            })?;
            builder.append_value(total);
        } else {
            builder.append_null();
        }
    }
    Ok(Arc::new(builder.finish()))
}

fn sum_unsigned<T>(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
) -> Result<ArrayRef>
where
    T: ArrowPrimitiveType,
    T::Native: Into<u128>,
{
    let array = values.as_primitive::<T>();
    let mut totals = vec![0u128; group_count];
    let mut saw_value = vec![false; group_count];
    for (row, group) in group_ids.iter().enumerate() {
        let Some(group) = group else { continue };
        if array.is_valid(row) {
            totals[*group] += Into::<u128>::into(array.value(row));
            saw_value[*group] = true;
        }
    }
    let mut builder = UInt64Builder::with_capacity(group_count);
    for group in 0..group_count {
        if saw_value[group] {
            let total = u64::try_from(totals[group]).map_err(|_| {
                Error::InvalidArgumentError("SUM result exceeds u64 range".into())
            })?;
            builder.append_value(total);
        } else {
            builder.append_null();
        }
    }
    Ok(Arc::new(builder.finish()))
}

fn mean_or_sum_float<T, F>(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
    mean: bool,
    cast: F,
) -> Result<ArrayRef>
where
    T: ArrowPrimitiveType,
    F: Fn(T::Native) -> f64,
{
    let array = values.as_primitive::<T>();
    let mut totals = vec![0f64; group_count];
    let mut counts = vec![0u64; group_count];
    for (row, group) in group_ids.iter().enumerate() {
        let Some(group) = group else { continue };
        if array.is_valid(row) {
            totals[*group] += cast(array.value(row));
            counts[*group] += 1;
        }
    }
    let mut builder = Float64Builder::with_capacity(group_count);
    for group in 0..group_count {
        if counts[group] == 0 {
            builder.append_null();
        } else if mean {
            builder.append_value(totals[group] / counts[group] as f64);
        } else {
            builder.append_value(totals[group]);
        }
    }
    Ok(Arc::new(builder.finish()))
}

/// Arg-min/arg-max over the row encoding of valid values, then a `take` to
/// surface the winners in the input's own type. Works for any type the row
/// converter supports, strings included.
fn grouped_min_max(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
    find_max: bool,
) -> Result<ArrayRef> {
    let converter = RowConverter::new(vec![SortField::new(values.data_type().clone())])?;
    let rows = converter.convert_columns(std::slice::from_ref(values))?;

    let mut best: Vec<Option<u32>> = vec![None; group_count];
    for (row, group) in group_ids.iter().enumerate() {
        let Some(group) = group else { continue };
        if values.is_null(row) {
            continue;
        }
        match best[*group] {
            None => best[*group] = Some(row as u32),
            Some(current) => {
                let candidate = rows.row(row);
                let incumbent = rows.row(current as usize);
                let wins = if find_max {
                    candidate > incumbent
                } else {
                    candidate < incumbent
                };
                if wins {
                    best[*group] = Some(row as u32);
                }
            }
        }
    }

    let picks = UInt32Array::from(best);
    take(values.as_ref(), &picks, None).map_err(Error::from)
}

fn grouped_first_last(
    values: &ArrayRef,
    group_ids: &[Option<usize>],
    group_count: usize,
    take_last: bool,
) -> Result<ArrayRef> {
    let mut picks: Vec<Option<u32>> = vec![None; group_count];
    for (row, group) in group_ids.iter().enumerate() {
        let Some(group) = group else { continue };
        if take_last || picks[*group].is_none() {
            picks[*group] = Some(row as u32);
        }
    }
    let picks = UInt32Array::from(picks);
    take(values.as_ref(), &picks, None).map_err(Error::from)
}
