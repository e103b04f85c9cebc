//! Main-context dispatch queue
//!
//! Every deferred step of the pager (starting a programmatic jump, the
//! completion of a container update) is appended to this queue and run
//! later on the same context that owns the coordinator. Nothing here blocks
//! and nothing runs concurrently; continuations run in submission order.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use parking_lot::Mutex;

/// Identifies one `set_current` request made by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionTicket(u64);

impl TransitionTicket {
    pub(crate) fn first() -> Self {
        Self(1)
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransitionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit of deferred work for the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Begin the two-step jump towards the latest requested selection
    StartJump,
    /// The container finished applying a `set_current` request
    SetCurrentFinished {
        ticket: TransitionTicket,
        finished: bool,
    },
}

/// FIFO of continuations waiting for the main context
#[derive(Clone, Default)]
pub struct DispatchQueue {
    pending: Arc<Mutex<VecDeque<Continuation>>>,
}

impl DispatchQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a continuation at the tail
    pub fn dispatch(&self, continuation: Continuation) {
        self.pending.lock().push_back(continuation);
    }

    /// Take the continuation at the head
    pub fn pop(&self) -> Option<Continuation> {
        self.pending.lock().pop_front()
    }

    /// Number of continuations waiting
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl fmt::Debug for DispatchQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pending.lock().iter()).finish()
    }
}
