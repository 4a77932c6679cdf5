//! Table and ordering primitives shared by the grist crates.
//!
//! A column is a plain Arrow array ([`arrow::array::ArrayRef`]): Arrow
//! already carries the type, length, null buffer, and null count, along with
//! the "zero nulls means no null buffer" invariant, so no wrapper type is
//! introduced. This crate adds the pieces Arrow does not provide directly:
//! [`Table`], an ordered collection of same-length columns, and the
//! [`Order`]/[`NullOrder`] directives used wherever per-column sort order and
//! null placement must be named.

#![forbid(unsafe_code)]

pub mod table;
pub mod types;

pub use table::Table;
pub use types::{NullOrder, Order, sort_options};
