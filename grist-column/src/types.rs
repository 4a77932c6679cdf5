use arrow::compute::SortOptions;

/// Sort direction for one key column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

/// Placement of null entries relative to valid entries in one key column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NullOrder {
    Before,
    After,
}

/// Translate an order/null-precedence pair into Arrow's sort options.
pub fn sort_options(order: Order, nulls: NullOrder) -> SortOptions {
    SortOptions {
        descending: order == Order::Descending,
        nulls_first: nulls == NullOrder::Before,
    }
}
