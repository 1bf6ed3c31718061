//! Assembling [`Pipe`](crate::Pipe)s from archive rows.

use std::collections::BTreeSet;

use crate::location::Location;
use crate::pipe::Pipe;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PipeInvalidReason {
    /// A cell lies outside the representable window of the pipe field.
    CellOutOfBounds,
    /// The seed lies outside the representable window of the pipe field.
    SeedOutOfBounds,
    /// [`build`](PipeBuilder::build) was called before a seed was given.
    NoSeed,
}

/// A builder for [`Pipe`]s from the unordered cells an archive stores.
///
/// Cells may be added in any order and more than once; the resulting [`Pipe`] is the same.
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone, Default)]
pub struct PipeBuilder {
    cells: BTreeSet<Location>,
    seed: Option<Location>,
    invalid_reasons: Vec<PipeInvalidReason>,
}

impl PipeBuilder {
    /// Start an empty pipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one cell.
    ///
    /// May cause the builder to enter a [`CellOutOfBounds`](PipeInvalidReason::CellOutOfBounds) invalid state.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_cell(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !location.is_representable() {
            self.invalid_reasons.push(PipeInvalidReason::CellOutOfBounds);
            return self;
        }

        self.cells.insert(location);
        self
    }

    /// Shorthand for multiple calls to [`Self::add_cell`], with the same conditions.
    pub fn add_cells(&mut self, locations: impl IntoIterator<Item = Location>) -> &mut Self {
        for location in locations {
            self.add_cell(location);
        }

        self
    }

    /// Set the known terminal the path must start from, replacing any earlier seed.
    ///
    /// The seed is expected to be one of the cells but this is checked only when reconstructing, where a stray seed is reported as corrupt source data.
    /// May cause the builder to enter a [`SeedOutOfBounds`](PipeInvalidReason::SeedOutOfBounds) invalid state.
    pub fn seed(&mut self, location: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !location.is_representable() {
            self.invalid_reasons.push(PipeInvalidReason::SeedOutOfBounds);
            return self;
        }

        self.seed = Some(location);
        self
    }

    /// Check the validity of this builder, ensuring no [`PipeInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<PipeInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<PipeInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Pipe`].
    pub fn build(&mut self) -> Result<Pipe, &Vec<PipeInvalidReason>> {
        if self.invalid_reasons.is_empty() && self.seed.is_none() {
            self.invalid_reasons.push(PipeInvalidReason::NoSeed);
        }

        match (self.invalid_reasons.is_empty(), self.seed) {
            (true, Some(seed)) => Ok(Pipe {
                cells: self.cells.clone(),
                seed,
            }),
            _ => Err(&self.invalid_reasons),
        }
    }
}
