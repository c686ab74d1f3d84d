//! Concurrency layer for bval
//!
//! This crate implements the observable cell:
//! - ObservableCell: a `parking_lot::RwLock`-guarded value
//! - Write hooks run under the write lock (`on_set`, `on_changed`)
//! - Atomic read-modify-write via `operate`
//! - CellBuilder: builder-style construction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod cell;

pub use builder::CellBuilder;
pub use cell::ObservableCell;
