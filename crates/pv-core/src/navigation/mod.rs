//! Neighbour computation and paging direction

mod direction;
mod navigator;

pub use direction::Direction;
pub use navigator::Navigator;
