//! Write hooks
//!
//! A hook receives `(old, new)` for a single write. Hooks are fixed when the
//! cell is built and run while the cell's write lock is held.

/// Callback invoked with the previous and the freshly written value.
pub type Hook<T> = Box<dyn Fn(&T, &T) + Send + Sync>;

/// Box a closure into a [`Hook`].
pub fn hook<T, F>(f: F) -> Hook<T>
where
    F: Fn(&T, &T) + Send + Sync + 'static,
{
    Box::new(f)
}
