//! Leaderboard records per category.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use itertools::Itertools;
use std::fmt::{Display, Formatter};

use strum::{EnumString, VariantArray};

use crate::score::{Candidate, ScoreField};

/// A leaderboard column: the best solution by one ordering of the score fields.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Category {
    /// Fewest cycles, then reactors, then symbols.
    LeastCycles,
    /// Fewest symbols, then reactors, then cycles.
    LeastSymbols,
    /// Fewest reactors, then cycles, then symbols.
    LeastCyclesFewestReactors,
    /// Fewest reactors, then symbols, then cycles.
    LeastSymbolsFewestReactors,
}

/// The operating system a solution was recorded on.
///
/// Levels with random inputs play out differently per OS, so their records are kept apart.
#[derive(Clone, Copy, Debug, strum::Display, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Platform {
    /// Windows
    Windows,
    /// Linux
    Linux,
    /// Anything else, or not known.
    #[strum(serialize = "Unknown OS")]
    Unknown,
}

impl Category {
    /// Score fields in the order this category compares them.
    pub fn fields(&self) -> [ScoreField; 3] {
        use ScoreField::*;
        match self {
            Self::LeastCycles => [Cycles, Reactors, Symbols],
            Self::LeastSymbols => [Symbols, Reactors, Cycles],
            Self::LeastCyclesFewestReactors => [Reactors, Cycles, Symbols],
            Self::LeastSymbolsFewestReactors => [Reactors, Symbols, Cycles],
        }
    }

    /// Whether the category is tracked for levels where reactor count is up to the player.
    pub fn needs_reactor_choice(&self) -> bool {
        matches!(self, Self::LeastCyclesFewestReactors | Self::LeastSymbolsFewestReactors)
    }

    /// The leaderboard column on `platform`.
    pub fn on(self, platform: Platform) -> RecordKey {
        RecordKey { category: self, platform: Some(platform) }
    }

    /// How `a` ranks against `b`; [`Ordering::Less`] means `a` is the better record.
    ///
    /// After the score fields, a solution with a video beats one without, then the earlier upload wins.
    pub fn compare(&self, a: &Candidate, b: &Candidate) -> Ordering {
        self.fields().iter()
            .map(|field| a.score.get(*field).cmp(&b.score.get(*field)))
            .fold(Ordering::Equal, Ordering::then)
            .then_with(|| b.link.is_some().cmp(&a.link.is_some()))
            .then_with(|| match (&a.uploaded, &b.uploaded) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", RecordKey::from(*self))
    }
}

/// One record slot of a level: a category, on a single platform for nondeterministic levels.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RecordKey {
    /// Compared fields.
    pub category: Category,
    /// Set only on levels with per-OS records.
    pub platform: Option<Platform>,
}

impl From<Category> for RecordKey {
    fn from(category: Category) -> Self {
        Self { category, platform: None }
    }
}

impl Display for RecordKey {
    /// Leaderboard heading, e.g. `Least Symbols - Linux - N Reactors`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let base = match self.category {
            Category::LeastCycles | Category::LeastCyclesFewestReactors => "Least Cycles",
            Category::LeastSymbols | Category::LeastSymbolsFewestReactors => "Least Symbols",
        };
        write!(f, "{}", base)?;
        if let Some(platform) = self.platform {
            write!(f, " - {}", platform)?;
        }
        if self.category.needs_reactor_choice() {
            write!(f, " - N Reactors")?;
        }
        Ok(())
    }
}

/// The record holder of every [`Category`] on one level.
#[derive(Clone, Debug)]
pub struct RecordBook {
    categories: Vec<Category>,
    per_platform: bool,
    reject_implausible: bool,
    records: BTreeMap<RecordKey, Candidate>,
}

impl RecordBook {
    /// A book for a level; reactor categories are kept only when `reactor_choice`, as on production and boss levels.
    pub fn new(reactor_choice: bool) -> Self {
        Self {
            categories: Category::VARIANTS.iter()
                .copied()
                .filter(|category| reactor_choice || !category.needs_reactor_choice())
                .collect_vec(),
            per_platform: false,
            reject_implausible: true,
            records: BTreeMap::new(),
        }
    }

    /// Keep records apart per [`Platform`], for levels whose inputs are random.
    pub fn per_platform(mut self) -> Self {
        self.per_platform = true;
        self
    }

    /// Keep implausible scores, for sources already known to be curated.
    pub fn accept_implausible(mut self) -> Self {
        self.reject_implausible = false;
        self
    }

    /// Offer `candidate`, recorded on `platform`, to every category, returning the slots it now holds.
    ///
    /// `platform` only matters for [`per_platform`](Self::per_platform) books.
    /// A candidate must be strictly better to take a record; the holder keeps it on a full tie.
    pub fn insert(&mut self, candidate: &Candidate, platform: Platform) -> Vec<RecordKey> {
        if self.reject_implausible && !candidate.score.is_plausible() {
            return Vec::new();
        }

        let mut taken = Vec::new();
        for category in &self.categories {
            let key = if self.per_platform { category.on(platform) } else { RecordKey::from(*category) };
            let better = match self.records.get(&key) {
                None => true,
                Some(holder) => category.compare(candidate, holder) == Ordering::Less,
            };
            if better {
                self.records.insert(key, candidate.clone());
                taken.push(key);
            }
        }
        taken
    }

    /// The holder of `key`, if it is tracked and anything was accepted.
    pub fn get(&self, key: impl Into<RecordKey>) -> Option<&Candidate> {
        self.records.get(&key.into())
    }

    /// Every held record, in category then platform order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordKey, &Candidate)> {
        self.records.iter().map(|(key, holder)| (*key, holder))
    }
}
