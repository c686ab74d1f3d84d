//! # bval
//!
//! A concurrency-safe observable cell: one value, one reader/writer lock,
//! and two optional write hooks fixed at construction.
//!
//! ## Quick Start
//!
//! ```
//! use bval::prelude::*;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let counter = Arc::new(ObservableCell::new([
//!     with_init_value(0u64),
//!     with_on_changed(|old: &u64, new: &u64| assert_eq!(old + 1, *new)),
//! ]));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let counter = Arc::clone(&counter);
//!         thread::spawn(move || counter.operate(|n| n + 1))
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(counter.get(), 4);
//! ```
//!
//! ## Hooks
//!
//! - `on_set(old, new)` fires on every write, changed or not
//! - `on_changed(old, new)` fires only when `old != new`
//!
//! Both run after the value is written and before the write lock is
//! released. A hook must not call back into the same cell: the lock is not
//! reentrant and the call deadlocks. A panicking hook does not roll the
//! write back.

#![warn(missing_docs)]

pub mod prelude;

pub use bval_concurrency::{CellBuilder, ObservableCell};
pub use bval_core::{
    hook, with_init_value, with_on_changed, with_on_set, CellConfig, CellOption, Error, Hook,
    Result,
};
