use std::cmp::Ordering;

/// Direction a page transition moves in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards greater selections (content slides in from the trailing edge)
    Forward,
    /// Towards smaller selections
    Reverse,
}

impl Direction {
    /// Direction of travel from `current` to `target`.
    ///
    /// Returns `None` for equal selections: there is no transition to run.
    pub fn between<S: Ord>(current: &S, target: &S) -> Option<Self> {
        match current.cmp(target) {
            Ordering::Less => Some(Direction::Forward),
            Ordering::Greater => Some(Direction::Reverse),
            Ordering::Equal => None,
        }
    }

    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Horizontal sign of the incoming page relative to the current one
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}
