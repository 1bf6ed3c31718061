use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use crate::builder::PipeBuilder;
use crate::cell::CellState;
use crate::field::Field;
use crate::location::Location;
use crate::search::{self, PipeFailure, SearchBudget};

/// The unordered cells of one component output, plus the seed its path starts from.
///
/// [`Pipe`]s should be built using a [`PipeBuilder`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipe {
    pub(crate) cells: BTreeSet<Location>,
    pub(crate) seed: Location,
}

impl Pipe {
    /// The cells, in `(x, y)` order.
    pub fn cells(&self) -> impl Iterator<Item = &Location> {
        self.cells.iter()
    }

    /// Number of distinct cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the pipe has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The known terminal.
    pub fn seed(&self) -> Location {
        self.seed
    }

    /// Put the cells in path order, starting from the seed.
    ///
    /// On success the path visits every cell exactly once and consecutive cells are 4-adjacent.
    /// The result depends only on the cell set and the seed, never on the order cells were added in.
    ///
    /// Returns [`PipeFailure::SeedNotFound`] if the seed is not a cell,
    /// or [`PipeFailure::Incomplete`] with the best path found if `budget` runs out.
    pub fn reconstruct(&self, budget: &SearchBudget) -> Result<Vec<Location>, PipeFailure> {
        search::reconstruct_cells(&self.cells, self.seed, budget)
    }
}

impl Display for Pipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut field = Field::with_pipe(&self.cells);
        if self.cells.contains(&self.seed) {
            field[self.seed] = CellState::Start;
        }
        write!(f, "{}", field)
    }
}

/// Order `cells` starting from `seed` with the default [`SearchBudget`].
///
/// Cells outside the representable window reject the whole pipe with [`PipeFailure::Invalid`].
pub fn reconstruct(cells: impl IntoIterator<Item = Location>, seed: Location) -> Result<Vec<Location>, PipeFailure> {
    let mut builder = PipeBuilder::new();
    builder.add_cells(cells).seed(seed);

    let pipe = builder.build().map_err(|reasons| PipeFailure::Invalid(reasons.clone()))?;
    pipe.reconstruct(&SearchBudget::default())
}
