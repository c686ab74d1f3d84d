//! Builder for observable cells
//!
//! Equivalent to passing [`CellOption`]s to `ObservableCell::new`: each call
//! mutates the pending [`CellConfig`] in order, so a later call of the same
//! kind replaces an earlier one.

use bval_core::{hook, CellConfig, CellOption};

use crate::cell::ObservableCell;

/// Builder for [`ObservableCell`] configuration.
///
/// # Example
///
/// ```
/// use bval_concurrency::CellBuilder;
///
/// let flag = CellBuilder::new()
///     .init_value(false)
///     .on_changed(|old: &bool, new: &bool| assert_ne!(old, new))
///     .build();
/// flag.operate(|on| !on);
/// assert!(flag.get());
/// ```
pub struct CellBuilder<T> {
    config: CellConfig<T>,
}

impl<T: Default> CellBuilder<T> {
    /// Start from the zero value with no hooks.
    pub fn new() -> Self {
        Self {
            config: CellConfig::default(),
        }
    }
}

impl<T: Default> Default for CellBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CellBuilder<T> {
    /// Start from `value` with no hooks. Does not require `T: Default`.
    pub fn starting_at(value: T) -> Self {
        Self {
            config: CellConfig::with_value(value),
        }
    }

    /// Set the initial value.
    pub fn init_value(mut self, value: T) -> Self {
        self.config.value = value;
        self
    }

    /// Install the hook fired on every write.
    pub fn on_set<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        self.config.on_set = Some(hook(f));
        self
    }

    /// Install the hook fired on writes where `old != new`.
    pub fn on_changed<F>(mut self, f: F) -> Self
    where
        F: Fn(&T, &T) + Send + Sync + 'static,
    {
        self.config.on_changed = Some(hook(f));
        self
    }

    /// Apply a functional option.
    pub fn option(mut self, option: CellOption<T>) -> Self {
        option.apply(&mut self.config);
        self
    }

    /// Build the cell.
    pub fn build(self) -> ObservableCell<T> {
        ObservableCell::from_config(self.config)
    }
}
