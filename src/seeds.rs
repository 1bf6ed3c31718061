//! Seed tables and whole-component reconstruction.

use std::collections::HashMap;
use std::num::ParseIntError;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, warn};
use thiserror::Error;

use crate::builder::PipeBuilder;
use crate::location::{Coord, Location};
use crate::search::{PipeFailure, SearchBudget};

/// Output port index of a component.
pub type OutputPort = u8;

/// Problems reading a seed table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedTableError {
    /// The header does not name the given column.
    #[error("seed table header has no `{0}` column")]
    MissingColumn(&'static str),
    /// A row has fewer fields than the header.
    #[error("line {line}: expected {expected} fields, found {found}")]
    ShortRow {
        /// 1-based line number.
        line: usize,
        /// Fields in the header.
        expected: usize,
        /// Fields on this line.
        found: usize,
    },
    /// A numeric field did not parse.
    #[error("line {line}: bad `{column}` value")]
    BadNumber {
        /// 1-based line number.
        line: usize,
        /// Name of the column.
        column: &'static str,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },
}

/// Problems reconstructing the pipes of one component.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedLookupError {
    /// No seed is known for this component type and output.
    #[error("no seed for output {port} of `{component_type}`")]
    UnknownSeed {
        /// Component type as named by the archive.
        component_type: String,
        /// The output lacking a seed.
        port: OutputPort,
    },
}

/// The ordering outcome for one output of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortPipe {
    /// Which output this pipe leaves from.
    pub port: OutputPort,
    /// The ordered pipe, or why it could not be ordered.
    pub result: Result<Vec<Location>, PipeFailure>,
}

/// Known pipe terminals, keyed by `(component type, output port)`.
///
/// Every instance of a component type starts the pipe of a given output at the same cell,
/// which is what makes the unordered archive data recoverable.
#[derive(Clone, Debug, Default)]
pub struct SeedTable {
    seeds: HashMap<(String, OutputPort), Location>,
}

impl SeedTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the seed for `(component_type, port)`, replacing any earlier one.
    pub fn insert(&mut self, component_type: impl Into<String>, port: OutputPort, seed: Location) -> &mut Self {
        self.seeds.insert((component_type.into(), port), seed);
        self
    }

    /// The seed for `(component_type, port)`.
    pub fn get(&self, component_type: &str, port: OutputPort) -> Option<Location> {
        self.seeds.get(&(component_type.to_owned(), port)).copied()
    }

    /// Number of known seeds.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Whether no seeds are known.
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Order every non-empty pipe of one component.
    ///
    /// Empty pipes are skipped. A missing seed fails the whole component, since its pipes cannot be written without it;
    /// per-pipe search failures are reported in each [`PortPipe`] and left to the caller.
    pub fn reconstruct_component(
        &self,
        component_type: &str,
        pipes: impl IntoIterator<Item = (OutputPort, Vec<Location>)>,
        budget: &SearchBudget,
    ) -> Result<Vec<PortPipe>, SeedLookupError> {
        let pipes = pipes.into_iter()
            .filter(|(_, cells)| !cells.is_empty())
            .map(|(port, cells)| match self.get(component_type, port) {
                Some(seed) => Ok((port, seed, cells)),
                None => Err(SeedLookupError::UnknownSeed { component_type: component_type.to_owned(), port }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(pipes.into_iter()
            .map(|(port, seed, cells)| {
                debug!("ordering output {} of `{}` ({} cells from {})", port, component_type, cells.len(), seed);

                let mut builder = PipeBuilder::new();
                builder.add_cells(cells).seed(seed);
                let result = match builder.build() {
                    Ok(pipe) => pipe.reconstruct(budget),
                    Err(reasons) => Err(PipeFailure::Invalid(reasons.clone())),
                };

                if let Err(failure) = &result {
                    warn!("output {} of `{}`: {}", port, component_type, failure);
                }

                PortPipe { port, result }
            })
            .collect_vec())
    }
}

const COLUMNS: [&str; 4] = ["type", "output", "x", "y"];

impl FromStr for SeedTable {
    type Err = SeedTableError;

    /// Parse comma separated rows under a header naming `type`, `output`, `x` and `y` columns in any order.
    /// Blank lines are ignored and whitespace around fields is trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            return Ok(Self::new());
        };
        let header = header.split(',').map(str::trim).collect_vec();

        let mut positions = [0; COLUMNS.len()];
        for (position, column) in positions.iter_mut().zip(COLUMNS) {
            *position = header.iter()
                .position(|name| *name == column)
                .ok_or(SeedTableError::MissingColumn(column))?;
        }
        let [type_at, output_at, x_at, y_at] = positions;

        let mut table = Self::new();
        for (line, row) in lines {
            let fields = row.split(',').map(str::trim).collect_vec();
            if fields.len() < header.len() {
                return Err(SeedTableError::ShortRow { line, expected: header.len(), found: fields.len() });
            }

            let port = fields[output_at].parse::<OutputPort>()
                .map_err(|source| SeedTableError::BadNumber { line, column: "output", source })?;
            let x = fields[x_at].parse::<Coord>()
                .map_err(|source| SeedTableError::BadNumber { line, column: "x", source })?;
            let y = fields[y_at].parse::<Coord>()
                .map_err(|source| SeedTableError::BadNumber { line, column: "y", source })?;

            table.insert(fields[type_at], port, Location(x, y));
        }

        Ok(table)
    }
}
