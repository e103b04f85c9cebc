//! Selection navigator

use std::fmt;
use num_traits::PrimInt;

type StepFn<S> = Box<dyn Fn(&S) -> S>;

/// Computes the selections immediately before and after a given one.
///
/// Both functions are called fresh every time the pager needs a neighbour,
/// so they may close over application state that changes between calls.
/// Nothing assumes `previous(next(s)) == s`.
pub struct Navigator<S> {
    previous: StepFn<S>,
    next: StepFn<S>,
}

impl<S> Navigator<S> {
    /// Create a navigator from a pair of step functions
    pub fn new(
        previous: impl Fn(&S) -> S + 'static,
        next: impl Fn(&S) -> S + 'static,
    ) -> Self {
        Self {
            previous: Box::new(previous),
            next: Box::new(next),
        }
    }

    /// Selection shown before `selection`
    pub fn previous(&self, selection: &S) -> S {
        (self.previous)(selection)
    }

    /// Selection shown after `selection`
    pub fn next(&self, selection: &S) -> S {
        (self.next)(selection)
    }
}

impl<S: PrimInt + 'static> Navigator<S> {
    /// Step by one in either direction, saturating at the type's bounds
    pub fn counting() -> Self {
        Self::new(
            |n: &S| n.saturating_sub(S::one()),
            |n: &S| n.saturating_add(S::one()),
        )
    }
}

impl<S> fmt::Debug for Navigator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator").finish_non_exhaustive()
    }
}
