use std::fmt::{Display, Formatter};

/// Signed grid coordinate, as stored by the game.
pub type Coord = i32;

/// Width of the pipe field, in cells.
pub const FIELD_WIDTH: usize = 56;
/// Height of the pipe field, in cells.
pub const FIELD_HEIGHT: usize = 41;
/// Leftmost representable column.
pub const BASE_X: Coord = -24;
/// Topmost representable row.
pub const BASE_Y: Coord = -18;

/// A cell of the pipe field.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
// x, y
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// `(row, column)` into the scratch array.
    ///
    /// Only meaningful for representable locations; inside the window `rem_euclid` is a bijection.
    pub(crate) fn as_index(&self) -> (usize, usize) {
        (
            self.1.rem_euclid(FIELD_HEIGHT as Coord) as usize,
            self.0.rem_euclid(FIELD_WIDTH as Coord) as usize,
        )
    }

    /// Translate by `(dx, dy)`.
    pub fn offset_by(self, rhs: (Coord, Coord)) -> Self {
        Self(self.0.saturating_add(rhs.0), self.1.saturating_add(rhs.1))
    }

    /// Whether this location falls inside the window starting at ([`BASE_X`], [`BASE_Y`]).
    pub fn is_representable(&self) -> bool {
        (BASE_X..BASE_X + FIELD_WIDTH as Coord).contains(&self.0)
            && (BASE_Y..BASE_Y + FIELD_HEIGHT as Coord).contains(&self.1)
    }

    /// Plain 4-adjacency; never wraps.
    pub fn is_adjacent(&self, other: Location) -> bool {
        matches!((self.0.abs_diff(other.0), self.1.abs_diff(other.1)), (0, 1) | (1, 0))
    }
}

impl From<(Coord, Coord)> for Location {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
