//! Page container capability
//!
//! The container is whatever actually shows pages on screen: a native
//! paging control, an egui widget, or the headless [`PageStack`]. The
//! coordinator only talks to it through [`PageContainer`], and the
//! container only ever holds [`TaggedPage`]s, so reading the displayed tag
//! is a plain field access.

mod page_stack;

pub use page_stack::PageStack;

use tracing::trace;

use crate::dispatch::{Continuation, DispatchQueue, TransitionTicket};
use crate::navigation::Direction;
use crate::page::TaggedPage;

/// How a container should swap in a new current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub direction: Direction,
    pub animated: bool,
}

impl Transition {
    /// Slide the new page in from `direction`
    pub fn animated(direction: Direction) -> Self {
        Self { direction, animated: true }
    }

    /// Swap without animation
    pub fn immediate(direction: Direction) -> Self {
        Self { direction, animated: false }
    }
}

/// One-shot completion handle for a `set_current` request.
///
/// Firing it does not call back into the coordinator directly; it enqueues a
/// continuation on the main dispatch queue. A handle dropped without being
/// fired reports the request as unfinished, so a container that is torn down
/// mid-animation cannot leave a jump waiting forever.
#[derive(Debug)]
pub struct Completion {
    ticket: TransitionTicket,
    /// Taken when the continuation is sent
    queue: Option<DispatchQueue>,
}

impl Completion {
    pub(crate) fn new(ticket: TransitionTicket, queue: DispatchQueue) -> Self {
        Self {
            ticket,
            queue: Some(queue),
        }
    }

    /// The request this completion belongs to
    pub fn ticket(&self) -> TransitionTicket {
        self.ticket
    }

    /// Report the request as done. `finished` is false when the container
    /// abandoned the animation before it ended.
    pub fn complete(mut self, finished: bool) {
        self.fire(finished);
    }

    fn fire(&mut self, finished: bool) {
        if let Some(queue) = self.queue.take() {
            queue.dispatch(Continuation::SetCurrentFinished {
                ticket: self.ticket,
                finished,
            });
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.queue.is_some() {
            trace!("Completion {} dropped unfired", self.ticket);
            self.fire(false);
        }
    }
}

/// Capabilities the coordinator needs from the control displaying pages
pub trait PageContainer<S, C> {
    /// The page currently on screen, if any
    fn displayed(&self) -> Option<&TaggedPage<S, C>>;

    /// Mutable access to the page currently on screen
    fn displayed_mut(&mut self) -> Option<&mut TaggedPage<S, C>>;

    /// The candidate page of a swipe in progress
    fn pending_mut(&mut self) -> Option<&mut TaggedPage<S, C>>;

    /// Replace the displayed page. The completion, when given, must be fired
    /// once the container has finished applying the change.
    fn set_current(
        &mut self,
        page: TaggedPage<S, C>,
        transition: Transition,
        completion: Option<Completion>,
    );

    /// Start an interactive swipe towards `candidate`
    fn begin_swipe(&mut self, candidate: TaggedPage<S, C>, direction: Direction);

    /// End the interactive swipe. A completed swipe makes the candidate the
    /// displayed page; a cancelled one discards it.
    fn end_swipe(&mut self, completed: bool);

    /// Whether an animated `set_current` is still running
    fn is_animating(&self) -> bool;
}
