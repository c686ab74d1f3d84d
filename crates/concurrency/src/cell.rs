//! Observable cell: a lock-guarded value with write hooks
//!
//! ## Locking
//!
//! All access goes through one `parking_lot::RwLock`:
//! - `get` / `with` take the read lock, so readers run concurrently
//! - `set` / `operate` / `replace` take the write lock for the whole call
//!
//! ## Write sequence
//!
//! ```text
//! 1. acquire write lock
//! 2. old = value; value = new
//! 3. on_set(old, new)                   if configured
//! 4. on_changed(old, new)               if configured and old != new
//! 5. release write lock
//! ```
//!
//! Hooks therefore observe the value already written, and no other
//! operation on the cell can interleave until both hooks have returned.
//! Writes are linearized: each write's `old` is the result of the write
//! that completed before it.
//!
//! ## Failure Modes
//!
//! - **Panicking hook**: the panic propagates out of the write call. The
//!   write is NOT rolled back. The guard is released during unwind and
//!   `parking_lot` locks do not poison, so the cell remains usable.
//! - **Re-entrant access**: calling `set`, `operate` or `get` on the same
//!   cell from inside a hook deadlocks. The lock is not reentrant.
//! - **Slow hook**: a hook that blocks stalls every other operation on the
//!   cell. Keep hooks short.

use bval_core::{CellConfig, CellOption, Error, Hook, Result};
use parking_lot::RwLock;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::builder::CellBuilder;

/// A concurrency-safe single value with `on_set` / `on_changed` hooks.
///
/// Share it by reference across scoped threads or behind an `Arc`.
///
/// # Invariants
///
/// 1. At most one writer holds the lock; readers never overlap a writer.
/// 2. Hooks are fixed at construction.
/// 3. `on_set` fires exactly once per write.
/// 4. `on_changed` fires iff `old != new`.
///
/// # Example
///
/// ```
/// use bval_concurrency::ObservableCell;
/// use bval_core::{with_init_value, with_on_changed};
///
/// let cell = ObservableCell::new([
///     with_init_value(5),
///     with_on_changed(|old: &i32, new: &i32| println!("{old} -> {new}")),
/// ]);
/// cell.set(7);
/// cell.operate(|x| x * 2);
/// assert_eq!(cell.get(), 14);
/// ```
pub struct ObservableCell<T> {
    value: RwLock<T>,
    on_set: Option<Hook<T>>,
    on_changed: Option<Hook<T>>,
}

impl<T> ObservableCell<T> {
    /// Build a cell from a fully applied configuration.
    pub fn from_config(config: CellConfig<T>) -> Self {
        debug!(
            value_type = std::any::type_name::<T>(),
            on_set = config.on_set.is_some(),
            on_changed = config.on_changed.is_some(),
            "Creating observable cell"
        );
        Self {
            value: RwLock::new(config.value),
            on_set: config.on_set,
            on_changed: config.on_changed,
        }
    }

    /// Cell holding `value` with no hooks. Does not require `T: Default`.
    pub fn with_value(value: T) -> Self {
        Self::from_config(CellConfig::with_value(value))
    }

    /// Create a builder for cell configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use bval_concurrency::ObservableCell;
    ///
    /// let cell = ObservableCell::builder()
    ///     .init_value(1u32)
    ///     .on_set(|old, new| assert_eq!(old + 1, *new))
    ///     .build();
    /// cell.operate(|x| x + 1);
    /// ```
    pub fn builder() -> CellBuilder<T>
    where
        T: Default,
    {
        CellBuilder::new()
    }

    /// Whether an `on_set` hook is configured.
    pub fn has_on_set(&self) -> bool {
        self.on_set.is_some()
    }

    /// Whether an `on_changed` hook is configured.
    pub fn has_on_changed(&self) -> bool {
        self.on_changed.is_some()
    }

    /// Mutable access through an exclusive borrow.
    ///
    /// No lock is taken and no hook fires: `&mut self` already proves
    /// nobody else can observe the cell.
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consume the cell, returning the stored value.
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Run `f` against the current value under the read lock.
    ///
    /// Avoids the clone `get` performs. `f` must not touch this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.read())
    }

    /// Get a copy of the current value.
    ///
    /// Blocks only while a writer holds the lock. Never runs hooks.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.read().clone()
    }

    /// Get a copy of the current value without waiting.
    ///
    /// Returns [`Error::WouldBlock`] if a writer holds the lock or is
    /// queued waiting for it.
    pub fn try_get(&self) -> Result<T>
    where
        T: Clone,
    {
        self.value
            .try_read()
            .map(|guard| guard.clone())
            .ok_or(Error::WouldBlock)
    }

    /// Get a copy of the current value, waiting at most `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> Result<T>
    where
        T: Clone,
    {
        match self.value.try_read_for(timeout) {
            Some(guard) => Ok(guard.clone()),
            None => Err(timed_out(timeout)),
        }
    }
}

impl<T: PartialEq> ObservableCell<T> {
    /// Start from the zero value and apply `options` left to right.
    ///
    /// Later options of the same kind override earlier ones. Construction
    /// takes no lock: the cell is not shared yet.
    pub fn new<I>(options: I) -> Self
    where
        T: Default,
        I: IntoIterator<Item = CellOption<T>>,
    {
        Self::from_config(CellConfig::from_options(options))
    }

    /// Write `value`, then run the hooks while still holding the write lock.
    ///
    /// If a hook panics the value stays written and the lock is released
    /// during unwind.
    pub fn set(&self, value: T) {
        let mut guard = self.value.write();
        self.commit(&mut *guard, value);
    }

    /// Write `value` and return the value it replaced.
    ///
    /// Hooks fire exactly as for [`set`](Self::set).
    pub fn replace(&self, value: T) -> T {
        let mut guard = self.value.write();
        self.commit(&mut *guard, value)
    }

    /// Atomic read-modify-write.
    ///
    /// The write lock is held from reading `old` through computing and
    /// writing `calc(old)` and running the hooks, so two concurrent
    /// `operate(|x| x + 1)` calls can never lose an increment.
    pub fn operate(&self, calc: impl FnOnce(&T) -> T) {
        let mut guard = self.value.write();
        let new = calc(&*guard);
        self.commit(&mut *guard, new);
    }

    /// Fallible read-modify-write.
    ///
    /// If `calc` returns `Err` the value is left untouched, no hook runs
    /// and the error is handed back.
    pub fn try_operate<E>(
        &self,
        calc: impl FnOnce(&T) -> std::result::Result<T, E>,
    ) -> std::result::Result<(), E> {
        let mut guard = self.value.write();
        let new = calc(&*guard)?;
        self.commit(&mut *guard, new);
        Ok(())
    }

    /// Write `value` only if the lock is free right now.
    ///
    /// Fails while any reader or writer holds the lock.
    /// On [`Error::WouldBlock`] nothing is written and no hook runs.
    pub fn try_set(&self, value: T) -> Result<()> {
        let mut guard = self.value.try_write().ok_or(Error::WouldBlock)?;
        self.commit(&mut *guard, value);
        Ok(())
    }

    /// Write `value`, waiting at most `timeout` for the lock.
    ///
    /// On [`Error::Timeout`] nothing is written and no hook runs.
    pub fn set_timeout(&self, value: T, timeout: Duration) -> Result<()> {
        let mut guard = self
            .value
            .try_write_for(timeout)
            .ok_or_else(|| timed_out(timeout))?;
        self.commit(&mut *guard, value);
        Ok(())
    }

    /// Store `new` into the locked slot and notify. Caller holds the write lock.
    fn commit(&self, slot: &mut T, new: T) -> T {
        let old = std::mem::replace(slot, new);
        let new: &T = slot;

        if let Some(on_set) = &self.on_set {
            on_set(&old, new);
        }

        if let Some(on_changed) = &self.on_changed {
            let changed = old != *new;
            trace!(changed, "Cell written");
            if changed {
                on_changed(&old, new);
            }
        } else {
            trace!("Cell written");
        }

        old
    }
}

fn timed_out(timeout: Duration) -> Error {
    warn!(?timeout, "Timed out waiting for cell lock");
    Error::Timeout { waited: timeout }
}

impl<T: Default> Default for ObservableCell<T> {
    fn default() -> Self {
        Self::with_value(T::default())
    }
}

impl<T> From<T> for ObservableCell<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("ObservableCell");
        // Never block here: Debug may be called from inside a hook.
        match self.value.try_read() {
            Some(guard) => d.field("value", &&*guard),
            None => d.field("value", &format_args!("<locked>")),
        };
        d.field("on_set", &self.on_set.is_some())
            .field("on_changed", &self.on_changed.is_some())
            .finish()
    }
}
