//! Core types for bval
//!
//! This crate defines the pieces an observable cell is assembled from:
//! - Hook: the `(old, new)` write callback
//! - CellConfig / CellOption: ordered construction options
//! - Error: failures of the non-blocking and timed operations

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod hook;
pub mod options;

pub use error::{Error, Result};
pub use hook::{hook, Hook};
pub use options::{with_init_value, with_on_changed, with_on_set, CellConfig, CellOption};
