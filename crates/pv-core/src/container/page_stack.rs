//! Headless page container

use std::fmt;
use tracing::trace;

use super::{Completion, PageContainer, Transition};
use crate::navigation::Direction;
use crate::page::TaggedPage;

/// A container that keeps pages in memory and leaves presentation to its
/// owner.
///
/// Animated updates stay in flight until [`PageStack::settle`] is called;
/// unanimated ones complete right away. Hosts that draw pages read the
/// displayed, pending and outgoing pages from here.
pub struct PageStack<S, C> {
    displayed: Option<TaggedPage<S, C>>,
    /// Candidate of an interactive swipe
    pending: Option<(TaggedPage<S, C>, Direction)>,
    /// Page being slid out by an animated `set_current`
    outgoing: Option<TaggedPage<S, C>>,
    in_flight: Option<(Completion, Direction)>,
}

impl<S, C> PageStack<S, C> {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            displayed: None,
            pending: None,
            outgoing: None,
            in_flight: None,
        }
    }

    /// The swipe candidate and the direction it comes from
    pub fn pending(&self) -> Option<(&TaggedPage<S, C>, Direction)> {
        self.pending.as_ref().map(|(page, dir)| (page, *dir))
    }

    /// The page leaving the screen during an animated update
    pub fn outgoing(&self) -> Option<&TaggedPage<S, C>> {
        self.outgoing.as_ref()
    }

    /// Direction of the animated update in flight
    pub fn animation_direction(&self) -> Option<Direction> {
        self.in_flight.as_ref().map(|(_, dir)| *dir)
    }

    /// Finish the animated update in flight and fire its completion
    pub fn settle(&mut self) {
        self.outgoing = None;
        if let Some((completion, _)) = self.in_flight.take() {
            trace!("Animated update {} settled", completion.ticket());
            completion.complete(true);
        }
    }
}

impl<S, C> Default for PageStack<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, C> PageContainer<S, C> for PageStack<S, C> {
    fn displayed(&self) -> Option<&TaggedPage<S, C>> {
        self.displayed.as_ref()
    }

    fn displayed_mut(&mut self) -> Option<&mut TaggedPage<S, C>> {
        self.displayed.as_mut()
    }

    fn pending_mut(&mut self) -> Option<&mut TaggedPage<S, C>> {
        self.pending.as_mut().map(|(page, _)| page)
    }

    fn set_current(
        &mut self,
        page: TaggedPage<S, C>,
        transition: Transition,
        completion: Option<Completion>,
    ) {
        // A newer update interrupts the running animation
        if let Some((previous, _)) = self.in_flight.take() {
            trace!("Animated update {} interrupted", previous.ticket());
            previous.complete(false);
        }
        self.pending = None;

        let previous = self.displayed.replace(page);
        if transition.animated {
            self.outgoing = previous;
            match completion {
                Some(completion) => self.in_flight = Some((completion, transition.direction)),
                None => self.outgoing = None,
            }
        } else {
            self.outgoing = None;
            if let Some(completion) = completion {
                completion.complete(true);
            }
        }
    }

    fn begin_swipe(&mut self, candidate: TaggedPage<S, C>, direction: Direction) {
        self.pending = Some((candidate, direction));
    }

    fn end_swipe(&mut self, completed: bool) {
        if let Some((candidate, _)) = self.pending.take() {
            if completed {
                self.displayed = Some(candidate);
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl<S: fmt::Debug, C> fmt::Debug for PageStack<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageStack")
            .field("displayed", &self.displayed)
            .field("pending", &self.pending)
            .field("outgoing", &self.outgoing)
            .field("animating", &self.in_flight.is_some())
            .finish()
    }
}
