use std::fmt::{Display, Formatter};
use std::ops::{Index, IndexMut};

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::CellState;
use crate::location::{Coord, Location, BASE_X, BASE_Y, FIELD_HEIGHT, FIELD_WIDTH};
use crate::shape::SquareStep;

/// Scratch grid the search annotates, recreated for every pipe.
#[derive(Clone)]
pub(crate) struct Field {
    cells: Array2<CellState>,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            cells: Array2::from_elem((FIELD_HEIGHT, FIELD_WIDTH), CellState::Empty),
        }
    }
}

impl Field {
    pub(crate) fn with_pipe<'a>(pipe: impl IntoIterator<Item = &'a Location>) -> Self {
        let mut field = Self::default();
        for location in pipe {
            field[*location] = CellState::Pipe;
        }
        field
    }

    /// State at `location`; anything outside the window reads as empty.
    pub(crate) fn get(&self, location: Location) -> CellState {
        if location.is_representable() {
            self.cells[location.as_index()]
        } else {
            CellState::Empty
        }
    }

    /// Unvisited pipe cells 4-adjacent to `at`, in [`SquareStep`] order.
    ///
    /// `include_end` is reported as well when it is adjacent, whatever its state.
    pub(crate) fn open_neighbors(&self, at: Location, include_end: Option<Location>) -> Vec<Location> {
        SquareStep::neighbors_of(at)
            .into_iter()
            .map(|(_, location)| location)
            .filter(|location| self.get(*location) == CellState::Pipe || Some(*location) == include_end)
            .collect_vec()
    }
}

impl Index<Location> for Field {
    type Output = CellState;

    fn index(&self, location: Location) -> &Self::Output {
        &self.cells[location.as_index()]
    }
}

impl IndexMut<Location> for Field {
    fn index_mut(&mut self, location: Location) -> &mut Self::Output {
        &mut self.cells[location.as_index()]
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // rows and columns start at the base offsets so that the field reads as in-game
        let rows = (BASE_Y..BASE_Y + FIELD_HEIGHT as Coord)
            .map(|y| (BASE_X..BASE_X + FIELD_WIDTH as Coord)
                .map(|x| self.get(Location(x, y)).symbol())
                .collect::<String>())
            .filter(|row| row.chars().any(|c| c != CellState::Empty.symbol()));

        for row in rows {
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}
