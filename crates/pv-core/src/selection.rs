//! Selection values and the binding shared with the application

use std::fmt;
use std::sync::Arc;
use parking_lot::RwLock;

/// A value identifying one page.
///
/// Selections must be totally ordered so the coordinator can tell whether a
/// programmatic jump moves forward or backward.
pub trait Selection: Clone + Ord + fmt::Debug + 'static {}

impl<T> Selection for T where T: Clone + Ord + fmt::Debug + 'static {}

/// Shared mutable cell holding the authoritative selection.
///
/// The application owns the binding and writes to it whenever it wants to
/// show a different page. The coordinator holds a clone and writes back the
/// tag of every page a swipe lands on.
pub struct SelectionBinding<S> {
    value: Arc<RwLock<S>>,
}

impl<S: Clone> SelectionBinding<S> {
    /// Create a new binding holding `initial`
    pub fn new(initial: S) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
        }
    }

    /// Get the current selection
    pub fn get(&self) -> S {
        self.value.read().clone()
    }

    /// Overwrite the current selection
    pub fn set(&self, value: S) {
        *self.value.write() = value;
    }

    /// Modify the selection in place
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut *self.value.write());
    }

    /// Whether both handles point at the same cell
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl<S> Clone for SelectionBinding<S> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for SelectionBinding<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectionBinding")
            .field(&*self.value.read())
            .finish()
    }
}
