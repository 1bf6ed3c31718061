use std::fmt::{Display, Formatter};

/// Search-time state of one cell of the scratch field.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) enum CellState {
    #[default]
    Empty,
    /// Member of the pipe not yet placed on a path.
    Pipe,
    Start,
    /// Forced terminal the backward front grows from.
    End,
    /// On a path, reached without alternatives.
    Committed,
    /// On a path, with alternatives shelved for backtracking.
    Branch,
}

impl CellState {
    pub(crate) fn symbol(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Pipe => 'p',
            Self::Start => 's',
            Self::End => 'e',
            Self::Committed => 'a',
            Self::Branch => 't',
        }
    }
}

impl Display for CellState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
