//! Error types and result definitions for the grist columnar core.
//!
//! All grist crates share the single [`Error`] enum and the [`Result<T>`]
//! alias defined here. Operations that can fail return `Result<T>` and
//! propagate with `?`; no operation retries internally, and no operation
//! exposes partially-built output alongside an error.

pub mod error;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;
