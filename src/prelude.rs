//! Convenient imports for bval.
//!
//! ```
//! use bval::prelude::*;
//!
//! let cell = ObservableCell::new([with_init_value(5)]);
//! cell.set(7);
//! assert_eq!(cell.get(), 7);
//! ```

// Main entry point
pub use crate::{CellBuilder, ObservableCell};

// Functional options
pub use crate::{with_init_value, with_on_changed, with_on_set, CellOption};

// Error handling
pub use crate::{Error, Result};
