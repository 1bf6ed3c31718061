use std::fmt::{Display, Formatter};

use strum::VariantArray;

/// What a solution scored. Lower is better in every field.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    /// Cycles to complete the level.
    pub cycles: u32,
    /// Reactors used.
    pub reactors: u32,
    /// Symbols placed across all reactors.
    pub symbols: u32,
    /// Relies on a game bug.
    pub bugged: bool,
    /// Relies on knowing the random input sequence in advance.
    pub precognitive: bool,
}

impl Score {
    /// A score with neither flag set.
    pub fn new(cycles: u32, reactors: u32, symbols: u32) -> Self {
        Self { cycles, reactors, symbols, ..Default::default() }
    }

    /// Whether a real reactor layout could produce this score.
    ///
    /// Every reactor needs at least an input, an output, two arrows and a swap, holds at most 2*2*80 symbols,
    /// and cannot finish faster than in, swap, out over the two waldos.
    pub fn is_plausible(&self) -> bool {
        let (cycles, reactors, symbols) = (self.cycles as u64, self.reactors as u64, self.symbols as u64);
        symbols >= 5 * reactors
            && symbols <= 320 * reactors
            && 2 * cycles >= 3 * reactors
    }

    /// The value of one field, with flags as `0` or `1`.
    pub fn get(&self, field: ScoreField) -> u32 {
        match field {
            ScoreField::Cycles => self.cycles,
            ScoreField::Reactors => self.reactors,
            ScoreField::Symbols => self.symbols,
            ScoreField::Bugged => self.bugged as u32,
            ScoreField::Precognitive => self.precognitive as u32,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.cycles, self.reactors, self.symbols)?;
        if self.bugged {
            write!(f, "/B")?;
        }
        if self.precognitive {
            write!(f, "/P")?;
        }
        Ok(())
    }
}

/// A field of [`Score`] that comparisons may take into account.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreField {
    /// [`Score::cycles`]
    Cycles,
    /// [`Score::reactors`]
    Reactors,
    /// [`Score::symbols`]
    Symbols,
    /// [`Score::bugged`]
    Bugged,
    /// [`Score::precognitive`]
    Precognitive,
}

/// One submitted solution as the archives know it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// The compared part.
    pub score: Score,
    /// Who submitted it.
    pub author: String,
    /// Free text, often the solution name.
    pub comment: Option<String>,
    /// A video of the solution running.
    pub link: Option<String>,
    /// Upload timestamp, in a format that sorts chronologically.
    pub uploaded: Option<String>,
}

impl Candidate {
    /// A candidate with no metadata beyond its author.
    pub fn new(score: Score, author: impl Into<String>) -> Self {
        Self { score, author: author.into(), ..Default::default() }
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach a video link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Attach an upload timestamp.
    pub fn with_uploaded(mut self, uploaded: impl Into<String>) -> Self {
        self.uploaded = Some(uploaded.into());
        self
    }
}
