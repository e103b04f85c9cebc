//! Errors reported by the paging coordinator

use thiserror::Error;

/// Reasons a gesture request was refused.
///
/// None of these are fatal: the pager keeps its previous state and the next
/// update cycle carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PagingError {
    #[error("Pager is busy ({0})")]
    Busy(&'static str),

    #[error("Container has no displayed page")]
    NoDisplayedPage,

    #[error("No swipe in progress")]
    NoSwipeInFlight,
}
