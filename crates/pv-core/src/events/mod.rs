//! Page lifecycle callbacks

use std::fmt;
use std::sync::Arc;
use parking_lot::Mutex;

type Callback<S> = Box<dyn FnMut(&S)>;

/// Optional application callbacks fired around page transitions.
///
/// `on_page_will_change` fires when a transition starts, with the tag of the
/// incoming page. `on_page_changed` fires once the transition is committed,
/// after the binding has been updated.
pub struct PageCallbacks<S> {
    on_page_will_change: Option<Callback<S>>,
    on_page_changed: Option<Callback<S>>,
}

impl<S> PageCallbacks<S> {
    /// No callbacks
    pub fn none() -> Self {
        Self {
            on_page_will_change: None,
            on_page_changed: None,
        }
    }

    /// Set the will-change callback
    pub fn on_page_will_change(mut self, f: impl FnMut(&S) + 'static) -> Self {
        self.on_page_will_change = Some(Box::new(f));
        self
    }

    /// Set the changed callback
    pub fn on_page_changed(mut self, f: impl FnMut(&S) + 'static) -> Self {
        self.on_page_changed = Some(Box::new(f));
        self
    }

    pub(crate) fn will_change(&mut self, tag: &S) {
        if let Some(f) = self.on_page_will_change.as_mut() {
            f(tag);
        }
    }

    pub(crate) fn changed(&mut self, tag: &S) {
        if let Some(f) = self.on_page_changed.as_mut() {
            f(tag);
        }
    }
}

impl<S> Default for PageCallbacks<S> {
    fn default() -> Self {
        Self::none()
    }
}

impl<S> fmt::Debug for PageCallbacks<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCallbacks")
            .field("on_page_will_change", &self.on_page_will_change.is_some())
            .field("on_page_changed", &self.on_page_changed.is_some())
            .finish()
    }
}

/// A recorded lifecycle callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent<S> {
    WillChange(S),
    Changed(S),
}

impl<S> PageEvent<S> {
    /// The tag the event was fired for
    pub fn tag(&self) -> &S {
        match self {
            PageEvent::WillChange(tag) | PageEvent::Changed(tag) => tag,
        }
    }
}

/// Shared, append-only record of lifecycle events
pub struct EventLog<S> {
    events: Arc<Mutex<Vec<PageEvent<S>>>>,
}

impl<S: Clone + 'static> EventLog<S> {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Callbacks that append every event to this log
    pub fn callbacks(&self) -> PageCallbacks<S> {
        let will = Arc::clone(&self.events);
        let changed = Arc::clone(&self.events);
        PageCallbacks::none()
            .on_page_will_change(move |tag: &S| will.lock().push(PageEvent::WillChange(tag.clone())))
            .on_page_changed(move |tag: &S| changed.lock().push(PageEvent::Changed(tag.clone())))
    }

    /// Copy of every recorded event, oldest first
    pub fn events(&self) -> Vec<PageEvent<S>> {
        self.events.lock().clone()
    }

    /// The most recent `n` events, oldest first
    pub fn latest(&self, n: usize) -> Vec<PageEvent<S>> {
        let events = self.events.lock();
        let start = events.len().saturating_sub(n);
        events[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forget all recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl<S: Clone + 'static> Default for EventLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for EventLog<S> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}
