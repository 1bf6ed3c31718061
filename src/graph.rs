use std::collections::BTreeSet;

use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;

use crate::location::Location;
use crate::shape::SquareStep;

/// Structural problems that make a cell set impossible to order as a single path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Defect {
    /// The cells fall into more than one 4-connected piece.
    Disconnected {
        /// Number of pieces.
        components: usize,
    },
    /// Some cell touches more than two others.
    Branching {
        /// The first such cell, in `(x, y)` order.
        at: Location,
        /// How many pipe cells it touches.
        degree: usize,
    },
}

/// The 4-adjacency graph induced by `cells`.
pub(crate) fn adjacency(cells: &BTreeSet<Location>) -> UnGraphMap<Location, ()> {
    let mut graph = UnGraphMap::with_capacity(cells.len(), cells.len() * 2);

    for location in cells {
        graph.add_node(*location);
        // every edge is seen from its lower end
        for step in [SquareStep::Down, SquareStep::Right] {
            let other = step.attempt_from(*location);
            if cells.contains(&other) {
                graph.add_edge(*location, other, ());
            }
        }
    }

    graph
}

/// Explain why `cells` cannot form a single simple path, if it is structural.
///
/// A cell set that is one connected piece of degree at most two yields [`None`].
pub(crate) fn diagnose(cells: &BTreeSet<Location>) -> Option<Defect> {
    if cells.is_empty() {
        return None;
    }

    let graph = adjacency(cells);

    let components = connected_components(&graph);
    if components > 1 {
        return Some(Defect::Disconnected { components });
    }

    cells.iter()
        .map(|location| (*location, graph.neighbors(*location).count()))
        .find(|(_, degree)| *degree > 2)
        .map(|(at, degree)| Defect::Branching { at, degree })
}
