#![warn(missing_docs)]

//! # `pipe-mover`
//!
//! Tools for moving [SpaceChem](https://en.wikipedia.org/wiki/SpaceChem) solutions between save files and community archives.
//!
//! A save file stores every pipe as an ordered list of cells. The archives only keep the set of cells each pipe covers,
//! plus, for every component type and output, a cell known to start the pipe (its "seed").
//! Writing an archived solution back into a save means recovering the order: a Hamiltonian path through the cells, 4-connected, starting at the seed.
//! Build a pipe with [`PipeBuilder`] and call [`Pipe::reconstruct`], or use [`reconstruct`] directly;
//! [`SeedTable`] does the same for every output of a component at once.
//!
//! Archives also hold many submissions per level. [`FrontierMaintainer`] keeps the ones not dominated on cycles, reactors and symbols
//! (optionally the bug and precognition flags too), and [`RecordBook`] tracks the leaderboard record in each category.
//!
//! # Internals
//! Reconstruction marks the pipe on a fixed 56 by 41 scratch field and grows paths over it with greedy depth-first search,
//! one step of lookahead to skip dead ends and forced moves, and an explicit backtracking stack.
//! When the pipe has a second degree-1 cell, a path is grown from each end in alternating rounds with escalating budgets until the two meet.
//! Budgets ([`SearchBudget`]) bound the work on malformed input; running out yields [`PipeFailure::Incomplete`] with the best path found.
//!
//! Repeated runs on the same cells always give the same path, whatever order the cells were supplied in.

pub use builder::{PipeBuilder, PipeInvalidReason};
pub use frontier::{dominates, Frontier, FrontierConfig, FrontierMaintainer, Outcome};
pub use graph::Defect;
pub use location::{Coord, Location, BASE_X, BASE_Y, FIELD_HEIGHT, FIELD_WIDTH};
pub use pipe::{reconstruct, Pipe};
pub use records::{Category, Platform, RecordBook, RecordKey};
pub use score::{Candidate, Score, ScoreField};
pub use search::{PipeFailure, SearchBudget};
pub use seeds::{OutputPort, PortPipe, SeedLookupError, SeedTable, SeedTableError};
pub use shape::{is_contiguous, SquareStep};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod field;
pub mod frontier;
pub(crate) mod graph;
pub(crate) mod location;
pub(crate) mod pipe;
pub mod records;
pub(crate) mod score;
pub(crate) mod search;
pub mod seeds;
pub mod shape;
mod tests;
