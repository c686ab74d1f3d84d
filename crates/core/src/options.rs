//! Construction options for observable cells
//!
//! A cell is configured by applying an ordered list of [`CellOption`]s to a
//! [`CellConfig`] that starts from the zero value with no hooks. Options are
//! applied left to right, so a later option of the same kind replaces an
//! earlier one.
//!
//! ```
//! use bval_core::{with_init_value, with_on_changed, CellConfig};
//!
//! let config = CellConfig::from_options([
//!     with_init_value(1),
//!     with_on_changed(|old: &i32, new: &i32| assert_ne!(old, new)),
//!     with_init_value(5),
//! ]);
//! assert_eq!(config.value, 5);
//! assert!(config.on_changed.is_some());
//! ```

use crate::hook::Hook;
use std::fmt;

/// Plain configuration a cell is built from.
pub struct CellConfig<T> {
    /// Value the cell starts with
    pub value: T,
    /// Fired on every write
    pub on_set: Option<Hook<T>>,
    /// Fired only on writes where `old != new`
    pub on_changed: Option<Hook<T>>,
}

impl<T> CellConfig<T> {
    /// Config holding `value` and no hooks.
    pub fn with_value(value: T) -> Self {
        Self {
            value,
            on_set: None,
            on_changed: None,
        }
    }

    /// Apply `options` in order on top of this config.
    pub fn apply<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = CellOption<T>>,
    {
        for option in options {
            option.apply(&mut self);
        }
        self
    }
}

impl<T: Default> CellConfig<T> {
    /// Start from the zero value and apply `options` in order.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = CellOption<T>>,
    {
        Self::default().apply(options)
    }
}

impl<T: Default> Default for CellConfig<T> {
    fn default() -> Self {
        Self::with_value(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for CellConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellConfig")
            .field("value", &self.value)
            .field("on_set", &self.on_set.is_some())
            .field("on_changed", &self.on_changed.is_some())
            .finish()
    }
}

/// A single construction option.
pub enum CellOption<T> {
    /// Replace the initial value
    InitValue(T),
    /// Install the on-set hook
    OnSet(Hook<T>),
    /// Install the on-changed hook
    OnChanged(Hook<T>),
}

impl<T> CellOption<T> {
    /// Mutate `config` with this option.
    pub fn apply(self, config: &mut CellConfig<T>) {
        match self {
            CellOption::InitValue(value) => config.value = value,
            CellOption::OnSet(hook) => config.on_set = Some(hook),
            CellOption::OnChanged(hook) => config.on_changed = Some(hook),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CellOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellOption::InitValue(value) => f.debug_tuple("InitValue").field(value).finish(),
            CellOption::OnSet(_) => f.write_str("OnSet(..)"),
            CellOption::OnChanged(_) => f.write_str("OnChanged(..)"),
        }
    }
}

/// Start the cell at `value` instead of the zero value.
pub fn with_init_value<T>(value: T) -> CellOption<T> {
    CellOption::InitValue(value)
}

/// Call `f(old, new)` after every write, changed or not.
pub fn with_on_set<T, F>(f: F) -> CellOption<T>
where
    F: Fn(&T, &T) + Send + Sync + 'static,
{
    CellOption::OnSet(Box::new(f))
}

/// Call `f(old, new)` after writes where `old != new`.
pub fn with_on_changed<T, F>(f: F) -> CellOption<T>
where
    F: Fn(&T, &T) + Send + Sync + 'static,
{
    CellOption::OnChanged(Box::new(f))
}
