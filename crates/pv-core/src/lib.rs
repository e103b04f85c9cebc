//! Core functionality for the paged content control
//!
//! This crate provides the toolkit-agnostic pieces of the pager: the
//! selection binding shared with the application, the navigator that
//! computes neighbouring selections, tagged pages, the page container
//! capability, and the coordinator that keeps all of them in sync.

pub mod container;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod navigation;
pub mod page;
pub mod selection;

// Re-export commonly used types
pub use container::{Completion, PageContainer, PageStack, Transition};
pub use coordinator::{PagingCoordinator, PagingPhase};
pub use dispatch::{Continuation, DispatchQueue, TransitionTicket};
pub use error::PagingError;
pub use events::{EventLog, PageCallbacks, PageEvent};
pub use navigation::{Direction, Navigator};
pub use page::{RenderFn, TaggedPage};
pub use selection::{Selection, SelectionBinding};
