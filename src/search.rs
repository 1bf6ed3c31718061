use std::collections::BTreeSet;

use itertools::Itertools;
use log::{debug, trace, warn};
use thiserror::Error;

use crate::builder::PipeInvalidReason;
use crate::cell::CellState;
use crate::field::Field;
use crate::graph::{self, Defect};
use crate::location::Location;

/// Iteration budgets bounding the backtracking search.
///
/// A budget counts failed extensions, i.e. the number of times the search ran out of candidates and had to back up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchBudget {
    /// Budget of the single pass used when the pipe has no second natural endpoint.
    pub single_pass: usize,
    /// Number of alternating forward/backward rounds when meeting in the middle.
    pub rounds: usize,
    /// Round `i` (counting from 1) may fail `i * round_step` times per front.
    pub round_step: usize,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            single_pass: 2000,
            rounds: 5,
            round_step: 100,
        }
    }
}

impl SearchBudget {
    /// Replace the single-pass budget.
    pub fn with_single_pass(mut self, single_pass: usize) -> Self {
        self.single_pass = single_pass;
        self
    }

    /// Replace the number of meet-in-the-middle rounds.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Replace the per-round escalation step.
    pub fn with_round_step(mut self, round_step: usize) -> Self {
        self.round_step = round_step;
        self
    }
}

/// Reasons a pipe could not be put in order.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PipeFailure {
    /// The seed is not one of the pipe's cells; the source data is corrupt.
    #[error("seed {seed} not found in pipe")]
    SeedNotFound {
        /// The declared seed.
        seed: Location,
    },
    /// The budget ran out before every cell was placed.
    #[error("incomplete piping ({}, {missing})", .partial.len())]
    Incomplete {
        /// The longest seed-anchored path found.
        partial: Vec<Location>,
        /// Cells of the pipe absent from `partial`.
        missing: usize,
        /// What is wrong with the cell set, when something structural is.
        defect: Option<Defect>,
    },
    /// The pipe was rejected before searching.
    #[error("invalid pipe: {0:?}")]
    Invalid(Vec<PipeInvalidReason>),
}

impl PipeFailure {
    /// Best-effort path; empty unless the search got as far as placing cells.
    pub fn partial(&self) -> &[Location] {
        match self {
            Self::Incomplete { partial, .. } => partial,
            _ => &[],
        }
    }
}

/// One growth pass of greedy depth-first search with an explicit backtracking stack.
struct Growth<'f> {
    field: &'f mut Field,
    target_len: usize,
    target: Option<Location>,
    iterations: usize,
    clean: bool,
}

impl Growth<'_> {
    /// Rank the candidates leaving the current cell with one step of lookahead.
    ///
    /// Fewer onward neighbours sort first, then [`SquareStep`](crate::shape::SquareStep) order.
    /// Only called with several candidates, so the path is at least two cells short of its target
    /// and a candidate with no way onward cannot be the one that finishes it.
    fn rank(&self, candidates: Vec<Location>) -> Vec<Location> {
        let mut ranked = Vec::with_capacity(candidates.len());

        // neighbour lists come out in step order and the sort is stable, so ties keep it
        let scored = candidates.into_iter()
            .map(|candidate| (self.field.open_neighbors(candidate, self.target).len(), candidate))
            .sorted_by_key(|(onward, _)| *onward);

        for (onward, candidate) in scored {
            match onward {
                // a dead end we can't finish on strands the other candidates
                0 => break,
                1 => {
                    // forced passage, or the cell next to the other front
                    ranked.push(candidate);
                    if self.target.is_some() {
                        break;
                    }
                }
                _ => ranked.push(candidate),
            }
        }

        ranked
    }

    fn finished(&self, path: &[Location]) -> bool {
        path.len() == self.target_len
            && match (self.target, path.last()) {
            (None, _) => true,
            (Some(target), Some(last)) => last.is_adjacent(target),
            (Some(_), None) => false,
        }
    }

    fn run(self, starting: &[Location]) -> Vec<Location> {
        let mut path = starting.to_vec();
        let Some(mut current) = path.last().copied() else {
            return path;
        };

        // one entry per cell placed since the first branch point
        let mut backtracking: Vec<Vec<Location>> = Vec::new();
        let mut failures = 0;

        loop {
            let mut candidates = self.field.open_neighbors(current, None);
            if candidates.len() > 1 {
                candidates = self.rank(candidates);
            }

            if candidates.is_empty() {
                if self.finished(&path) {
                    return path;
                }

                failures += 1;
                if failures >= self.iterations {
                    let keep = path.len() - backtracking.len();
                    if self.clean {
                        for location in &path[keep..] {
                            self.field[*location] = CellState::Pipe;
                        }
                    }
                    debug!("growth from {} gave up after {} failures, keeping {} cells", path[0], failures, keep);
                    path.truncate(keep);
                    return path;
                }

                // back up to the most recent branch point with something left to try
                while candidates.is_empty() {
                    let Some(shelved) = backtracking.pop() else {
                        trace!("growth from {} exhausted every alternative", path[0]);
                        return path;
                    };
                    if let Some(abandoned) = path.pop() {
                        self.field[abandoned] = CellState::Pipe;
                    }
                    candidates = shelved;
                }
            }

            let next = candidates[0];
            path.push(next);
            if candidates.len() > 1 || !backtracking.is_empty() {
                backtracking.push(candidates[1..].to_vec());
                self.field[next] = CellState::Branch;
            } else {
                self.field[next] = CellState::Committed;
            }
            current = next;
        }
    }
}

/// Order `cells` into a path starting at `seed`.
///
/// `cells` must iterate in a canonical order; the endpoint scan depends on it.
pub(crate) fn reconstruct_cells(cells: &BTreeSet<Location>, seed: Location, budget: &SearchBudget) -> Result<Vec<Location>, PipeFailure> {
    if !cells.contains(&seed) {
        warn!("Seed {} not found", seed);
        return Err(PipeFailure::SeedNotFound { seed });
    }

    let mut field = Field::with_pipe(cells);

    // a second degree-1 cell lets us meet the pipe in the middle
    let end = cells.iter()
        .copied()
        .find(|location| *location != seed && field.open_neighbors(*location, None).len() == 1);

    // the seed is marked only after the scan, so it still counts as a neighbour there
    field[seed] = CellState::Start;

    let output = match end {
        None => Growth {
            field: &mut field,
            target_len: cells.len(),
            target: None,
            iterations: budget.single_pass,
            clean: false,
        }.run(&[seed]),
        Some(end) => {
            field[end] = CellState::End;

            let mut forward = vec![seed];
            let mut backward = vec![end];
            for round in 1..=budget.rounds {
                let iterations = round * budget.round_step;

                forward = Growth {
                    field: &mut field,
                    target_len: cells.len() - backward.len(),
                    target: backward.last().copied(),
                    iterations,
                    clean: true,
                }.run(&forward);

                backward = Growth {
                    field: &mut field,
                    target_len: cells.len() - forward.len(),
                    target: forward.last().copied(),
                    iterations,
                    // the last round leaves its markings for the diagnostic
                    clean: round != budget.rounds,
                }.run(&backward);

                trace!("round {}: forward {} cells, backward {} cells", round, forward.len(), backward.len());

                if forward.len() + backward.len() == cells.len() && fronts_meet(&forward, &backward) {
                    forward.extend(backward.into_iter().rev());
                    return Ok(forward);
                }
            }

            if fronts_meet(&forward, &backward) {
                forward.extend(backward.into_iter().rev());
            }
            forward
        }
    };

    if output.len() == cells.len() {
        return Ok(output);
    }

    let missing = cells.len() - output.len();
    warn!("Incomplete piping ({}, {})\n{}", output.len(), missing, field);

    Err(PipeFailure::Incomplete {
        partial: output,
        missing,
        defect: graph::diagnose(cells),
    })
}

fn fronts_meet(forward: &[Location], backward: &[Location]) -> bool {
    match (forward.last(), backward.last()) {
        (Some(a), Some(b)) => a.is_adjacent(*b),
        _ => false,
    }
}
