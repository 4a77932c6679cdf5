//! Grist: dictionary encoding and group-by aggregation over Arrow columns.
//!
//! This crate is the entrypoint for the grist columnar core. It re-exports
//! the public surface of the underlying `grist-*` crates.
//!
//! # Architecture
//!
//! Grist is organized as a layered workspace:
//!
//! - **Base types** (`grist-column`): [`Table`] over Arrow columns, shared
//!   [`Order`]/[`NullOrder`] directives.
//! - **Dictionary encoding** (`grist-dict`): [`DictionaryColumn`] with a
//!   sorted, unique, non-null key set and per-row indices; [`encode`] and
//!   dense [`DictionaryColumn::decode`].
//! - **Aggregation** (`grist-groupby`): [`GroupBy`] partitions a key table's
//!   rows by structural tuple equality and computes the requested operators
//!   per group.
//! - **Verification** (`grist-verify`): the [`verify`] module's
//!   order-invariant comparison protocol for unordered group output.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array};
//! use grist::{AggregateKind, AggregationRequest, GroupBy, GroupByOptions, Table};
//!
//! let keys: ArrayRef = Arc::new(Int64Array::from(vec![1, 1, 2, 2]));
//! let values: ArrayRef = Arc::new(Int64Array::from(vec![10, 20, 30, 40]));
//!
//! let engine = GroupBy::new(
//!     Table::try_new(vec![keys]).unwrap(),
//!     GroupByOptions::default(),
//! )
//! .unwrap();
//! let (unique_keys, results) = engine
//!     .aggregate(&[AggregationRequest {
//!         values,
//!         aggregations: vec![AggregateKind::Sum],
//!     }])
//!     .unwrap();
//! assert_eq!(unique_keys.num_rows(), 2);
//! assert_eq!(results[0].columns.len(), 1);
//! ```

pub use grist_column::{NullOrder, Order, Table};
pub use grist_dict::{DictionaryColumn, encode};
pub use grist_groupby::{
    AggregateKind, AggregationRequest, AggregationResult, GroupBy, GroupByOptions,
};
pub use grist_result::{Error, Result};

pub mod verify {
    //! Order-invariant result comparison.
    //!
    //! Group output order is unspecified; apply [`canonical_order`] (or
    //! [`canonicalize`]) before positional comparison.

    pub use grist_verify::{
        canonical_order, canonicalize, columns_equal, sorted_order, tables_equal,
    };
}
