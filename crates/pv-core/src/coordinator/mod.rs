//! Paging coordinator
//!
//! Bridges the application's selection binding with a gesture driven page
//! container. Swipes flow in through [`PagingCoordinator::begin_swipe`] and
//! [`PagingCoordinator::finish_swipe`] and are written back to the binding.
//! External writes to the binding are picked up by
//! [`PagingCoordinator::reconcile`] and turned into a two-step jump that runs
//! as continuations on the dispatch queue:
//!
//! ```text
//!   Idle ──begin_swipe──► Swiping ──finish_swipe(true)──► Committing ──► Idle
//!                            └─────finish_swipe(false)──────────────────► Idle
//!
//!   Idle ──jump_to──► JumpScheduled ──StartJump──► AwaitingStep1 (animated)
//!        ──finished──► AwaitingStep2 (unanimated) ──finished──► Idle
//! ```

mod reconcile;
#[cfg(test)]
mod tests;

use std::fmt;
use tracing::{debug, trace, warn};

use crate::container::{Completion, PageContainer, Transition};
use crate::dispatch::{Continuation, DispatchQueue, TransitionTicket};
use crate::error::PagingError;
use crate::events::PageCallbacks;
use crate::navigation::{Direction, Navigator};
use crate::page::{RenderFn, TaggedPage};
use crate::selection::{Selection, SelectionBinding};

/// Where the coordinator is in its transition lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingPhase {
    /// Nothing in flight
    Idle,
    /// An interactive swipe is under way
    Swiping,
    /// A completed swipe is being written back
    Committing,
    /// A jump has been requested and waits for its turn on the queue
    JumpScheduled,
    /// Animated update towards the jump target is running
    AwaitingStep1 {
        ticket: TransitionTicket,
        direction: Direction,
    },
    /// Unanimated re-set of the jump target is running
    AwaitingStep2 { ticket: TransitionTicket },
}

impl PagingPhase {
    /// Short human readable name
    pub fn name(&self) -> &'static str {
        match self {
            PagingPhase::Idle => "idle",
            PagingPhase::Swiping => "swiping",
            PagingPhase::Committing => "committing",
            PagingPhase::JumpScheduled => "jump scheduled",
            PagingPhase::AwaitingStep1 { .. } => "jump step 1",
            PagingPhase::AwaitingStep2 { .. } => "jump step 2",
        }
    }
}

/// Keeps a page container and a selection binding in agreement
pub struct PagingCoordinator<S, C, K> {
    binding: SelectionBinding<S>,
    navigator: Navigator<S>,
    render: RenderFn<S, C>,
    callbacks: PageCallbacks<S>,
    container: K,
    queue: DispatchQueue,
    phase: PagingPhase,
    /// Latest jump target that has not settled yet
    requested: Option<S>,
    /// Target of the jump step currently running
    landing: Option<S>,
    next_ticket: TransitionTicket,
}

impl<S, C, K> PagingCoordinator<S, C, K>
where
    S: Selection,
    K: PageContainer<S, C>,
{
    /// Create a coordinator and show the binding's current selection in
    /// `container` without animation
    pub fn new(
        binding: SelectionBinding<S>,
        navigator: Navigator<S>,
        render: impl Fn(&S) -> C + 'static,
        mut container: K,
    ) -> Self {
        let render: RenderFn<S, C> = Box::new(render);
        let initial = binding.get();
        debug!(selection = ?initial, "Initializing pager");

        let page = TaggedPage::new(initial, &*render);
        container.set_current(page, Transition::immediate(Direction::Forward), None);

        Self {
            binding,
            navigator,
            render,
            callbacks: PageCallbacks::none(),
            container,
            queue: DispatchQueue::new(),
            phase: PagingPhase::Idle,
            requested: None,
            landing: None,
            next_ticket: TransitionTicket::first(),
        }
    }

    /// Replace the lifecycle callbacks
    pub fn with_callbacks(mut self, callbacks: PageCallbacks<S>) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Set the callback fired when a transition starts
    pub fn on_page_will_change(mut self, f: impl FnMut(&S) + 'static) -> Self {
        self.callbacks = std::mem::take(&mut self.callbacks).on_page_will_change(f);
        self
    }

    /// Set the callback fired when a transition is committed
    pub fn on_page_changed(mut self, f: impl FnMut(&S) + 'static) -> Self {
        self.callbacks = std::mem::take(&mut self.callbacks).on_page_changed(f);
        self
    }

    /// A freshly rendered page for the selection before `tag`
    pub fn neighbor_before(&self, tag: &S) -> TaggedPage<S, C> {
        self.make_page(self.navigator.previous(tag))
    }

    /// A freshly rendered page for the selection after `tag`
    pub fn neighbor_after(&self, tag: &S) -> TaggedPage<S, C> {
        self.make_page(self.navigator.next(tag))
    }

    /// Start an interactive swipe in `direction`.
    ///
    /// Refused while another transition or jump is in flight so the
    /// container never sees overlapping updates.
    pub fn begin_swipe(&mut self, direction: Direction) -> Result<(), PagingError> {
        if self.phase != PagingPhase::Idle {
            return Err(PagingError::Busy(self.phase.name()));
        }
        let current = self.displayed_tag().ok_or(PagingError::NoDisplayedPage)?;

        let candidate = match direction {
            Direction::Forward => self.neighbor_after(&current),
            Direction::Reverse => self.neighbor_before(&current),
        };
        debug!(from = ?current, to = ?candidate.tag(), ?direction, "Swipe began");

        self.container.begin_swipe(candidate, direction);
        self.phase = PagingPhase::Swiping;
        self.on_transition_settling();
        Ok(())
    }

    /// Announce the pending page and bring its content up to date
    pub fn on_transition_settling(&mut self) {
        let Some(pending) = self.container.pending_mut() else {
            trace!("No pending page to settle");
            return;
        };
        self.callbacks.will_change(pending.tag());
        pending.refresh(&*self.render);
    }

    /// End the interactive swipe, committing it when `completed`
    pub fn finish_swipe(&mut self, completed: bool) -> Result<(), PagingError> {
        if self.phase != PagingPhase::Swiping {
            return Err(PagingError::NoSwipeInFlight);
        }

        self.container.end_swipe(completed);
        if completed {
            self.phase = PagingPhase::Committing;
        }
        self.on_transition_finished(completed);
        self.phase = PagingPhase::Idle;

        if completed {
            // The swipe's writeback is now the authoritative selection
            if let Some(superseded) = self.requested.take() {
                debug!(target = ?superseded, "Swipe superseded pending jump");
            }
        } else if self.requested.is_some() {
            self.schedule_jump();
        }
        Ok(())
    }

    /// Write a committed swipe back to the binding.
    ///
    /// A cancelled swipe leaves everything untouched.
    pub fn on_transition_finished(&mut self, completed: bool) {
        if !completed {
            debug!("Swipe cancelled");
            return;
        }
        let Some(page) = self.container.displayed_mut() else {
            warn!("Swipe finished without a displayed page");
            return;
        };

        let tag = page.tag().clone();
        self.binding.set(tag.clone());
        self.callbacks.changed(&tag);
        page.refresh(&*self.render);
        debug!(selection = ?tag, "Swipe committed");
    }

    /// Move to `target` without a gesture.
    ///
    /// Requests arriving before an earlier jump settles replace its target;
    /// each step of the jump reads the latest one. Jumping to the selection
    /// already shown does nothing.
    pub fn jump_to(&mut self, target: S) {
        let Some(shown) = self.shown_tag() else {
            trace!("Jump ignored, nothing displayed");
            return;
        };
        if shown == target {
            trace!(selection = ?target, "Jump target already shown");
            return;
        }

        if self.binding.get() != target {
            self.binding.set(target.clone());
        }
        debug!(from = ?shown, to = ?target, phase = self.phase.name(), "Jump requested");
        self.requested = Some(target);

        if self.phase == PagingPhase::Idle {
            self.schedule_jump();
        }
    }

    /// Run the continuations queued at the time of the call.
    ///
    /// Continuations they enqueue wait for the next call, like work posted
    /// to the tail of a main loop. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let count = self.queue.len();
        for _ in 0..count {
            match self.queue.pop() {
                Some(continuation) => self.handle(continuation),
                None => break,
            }
        }
        count
    }

    /// Run continuations until the queue is empty
    pub fn run_until_idle(&mut self) -> usize {
        let mut count = 0;
        while let Some(continuation) = self.queue.pop() {
            self.handle(continuation);
            count += 1;
        }
        count
    }

    fn handle(&mut self, continuation: Continuation) {
        match continuation {
            Continuation::StartJump => self.start_jump(),
            Continuation::SetCurrentFinished { ticket, finished } => {
                self.set_current_finished(ticket, finished)
            }
        }
    }

    fn schedule_jump(&mut self) {
        self.phase = PagingPhase::JumpScheduled;
        self.queue.dispatch(Continuation::StartJump);
    }

    fn start_jump(&mut self) {
        if self.phase != PagingPhase::JumpScheduled {
            trace!(phase = self.phase.name(), "Dropping stale jump start");
            return;
        }

        let current = self.displayed_tag();
        let target = self.requested.clone();
        let (Some(current), Some(target)) = (current, target) else {
            self.requested = None;
            self.phase = PagingPhase::Idle;
            return;
        };
        let Some(direction) = Direction::between(&current, &target) else {
            trace!(selection = ?target, "Jump target reached before start");
            self.requested = None;
            self.phase = PagingPhase::Idle;
            return;
        };

        debug!(from = ?current, to = ?target, ?direction, "Jump step 1");
        self.callbacks.will_change(&target);

        let ticket = self.issue_ticket();
        self.phase = PagingPhase::AwaitingStep1 { ticket, direction };
        let page = self.make_page(target.clone());
        self.landing = Some(target);
        self.container.set_current(
            page,
            Transition::animated(direction),
            Some(Completion::new(ticket, self.queue.clone())),
        );
    }

    fn set_current_finished(&mut self, ticket: TransitionTicket, finished: bool) {
        match self.phase {
            PagingPhase::AwaitingStep1 { ticket: expected, direction } if expected == ticket => {
                if !finished {
                    debug!(%ticket, "Jump animation interrupted");
                }
                let Some(target) = self.requested.clone().or_else(|| self.displayed_tag()) else {
                    self.phase = PagingPhase::Idle;
                    return;
                };
                if self.landing.as_ref() != Some(&target) {
                    self.callbacks.will_change(&target);
                }

                trace!(selection = ?target, "Jump step 2");
                let next = self.issue_ticket();
                self.phase = PagingPhase::AwaitingStep2 { ticket: next };
                let page = self.make_page(target.clone());
                self.landing = Some(target);
                self.container.set_current(
                    page,
                    Transition::immediate(direction),
                    Some(Completion::new(next, self.queue.clone())),
                );
            }
            PagingPhase::AwaitingStep2 { ticket: expected } if expected == ticket => {
                self.phase = PagingPhase::Idle;
                self.landing = None;
                let Some(page) = self.container.displayed_mut() else {
                    warn!("Jump settled without a displayed page");
                    self.requested = None;
                    return;
                };
                page.refresh(&*self.render);
                let landed = page.tag().clone();

                match self.requested.take() {
                    Some(target) if target != landed => {
                        debug!(landed = ?landed, target = ?target, "Jump target moved, jumping again");
                        self.requested = Some(target);
                        self.schedule_jump();
                    }
                    _ => {
                        debug!(selection = ?landed, "Jump settled");
                        self.callbacks.changed(&landed);
                    }
                }
            }
            _ => trace!(%ticket, phase = self.phase.name(), "Ignoring stale completion"),
        }
    }

    fn issue_ticket(&mut self) -> TransitionTicket {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        ticket
    }

    fn make_page(&self, tag: S) -> TaggedPage<S, C> {
        TaggedPage::new(tag, &*self.render)
    }

    /// Selection the pager is showing or heading to
    fn shown_tag(&self) -> Option<S> {
        self.requested.clone().or_else(|| self.displayed_tag())
    }

    /// Tag of the page on screen
    pub fn displayed_tag(&self) -> Option<S> {
        self.container.displayed().map(|page| page.tag().clone())
    }

    pub fn phase(&self) -> PagingPhase {
        self.phase
    }

    /// No transition or jump step is running
    pub fn is_idle(&self) -> bool {
        self.phase == PagingPhase::Idle
    }

    /// Idle with nothing queued and no animation running
    pub fn is_settled(&self) -> bool {
        self.is_idle()
            && self.requested.is_none()
            && self.queue.is_empty()
            && !self.container.is_animating()
    }

    /// The binding shared with the application
    pub fn binding(&self) -> &SelectionBinding<S> {
        &self.binding
    }

    pub fn container(&self) -> &K {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut K {
        &mut self.container
    }

    /// Queue the coordinator's continuations run on
    pub fn dispatch_queue(&self) -> &DispatchQueue {
        &self.queue
    }
}

impl<S: fmt::Debug, C, K: fmt::Debug> fmt::Debug for PagingCoordinator<S, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingCoordinator")
            .field("binding", &self.binding)
            .field("phase", &self.phase)
            .field("requested", &self.requested)
            .field("container", &self.container)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
