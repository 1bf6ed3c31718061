//! Steps between cells of the square grid.

use itertools::Itertools;
use strum::VariantArray;

use crate::location::Location;

/// The four steps between 4-adjacent cells.
///
/// Declaration order is the direction priority used to break ties while searching.
/// It matches ordering the destination cells by `(x, y)`, so a step listing and a coordinate listing agree.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards lower `x`.
    Left,
    /// Towards lower `y`.
    Up,
    /// Towards higher `y`.
    Down,
    /// Towards higher `x`.
    Right,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may fall outside the representable window; callers decide what that means.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Left => location.offset_by((-1, 0)),
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
            Self::Right => location.offset_by((1, 0)),
        }
    }

    /// Every theoretical neighbour of `location`, in priority order.
    pub fn neighbors_of(location: Location) -> Vec<(Self, Location)> {
        Self::VARIANTS.iter()
            .map(|dir| (*dir, dir.attempt_from(location)))
            .collect_vec()
    }

    /// Determine the direction from `a` to `b`, or [`None`] when they are not 4-adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}

/// Whether every consecutive pair in `path` is 4-adjacent.
///
/// Empty and single-cell paths are trivially contiguous.
pub fn is_contiguous(path: &[Location]) -> bool {
    path.iter()
        .tuple_windows()
        .all(|(a, b)| SquareStep::direction_to(*a, *b).is_some())
}
