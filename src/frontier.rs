//! Pareto frontiers of submitted solutions.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::trace;

use crate::score::{Candidate, Score, ScoreField};

/// Which fields a [`Frontier`] compares and whether it screens out impossible scores.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrontierConfig {
    /// Fields taking part in dominance.
    pub fields: Vec<ScoreField>,
    /// Reject scores failing [`Score::is_plausible`] before comparing.
    pub reject_implausible: bool,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            fields: vec![ScoreField::Cycles, ScoreField::Reactors, ScoreField::Symbols],
            reject_implausible: true,
        }
    }
}

impl FrontierConfig {
    /// Compare on exactly `fields`.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = ScoreField>) -> Self {
        self.fields = fields.into_iter().collect_vec();
        self
    }

    /// Also compare the bug and precognition flags, so that clean solutions survive next to flagged ones.
    pub fn with_flags(mut self) -> Self {
        for flag in [ScoreField::Bugged, ScoreField::Precognitive] {
            if !self.fields.contains(&flag) {
                self.fields.push(flag);
            }
        }
        self
    }

    /// Keep implausible scores.
    pub fn accept_implausible(mut self) -> Self {
        self.reject_implausible = false;
        self
    }
}

/// Whether `a` makes `b` redundant on `fields`.
///
/// That is the case when `a` is no worse anywhere, which includes `a` and `b` being equal:
/// an incumbent keeps its place against an identical newcomer.
pub fn dominates(a: &Score, b: &Score, fields: &[ScoreField]) -> bool {
    fields.iter().all(|field| a.get(*field) <= b.get(*field))
}

/// What [`Frontier::consider`] did with a candidate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The candidate joined the frontier, evicting this many members.
    Inserted {
        /// Members it dominated.
        evicted: usize,
    },
    /// A member is at least as good; nothing changed.
    Dominated,
    /// The score cannot be real; nothing changed.
    Implausible,
}

/// The solutions of one level not dominated by any other.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    config: FrontierConfig,
    members: Vec<Candidate>,
}

impl Frontier {
    /// Start an empty frontier.
    pub fn new(config: FrontierConfig) -> Self {
        Self { config, members: Vec::new() }
    }

    /// Offer `candidate`, inserting it unless a member is at least as good.
    pub fn consider(&mut self, candidate: Candidate) -> Outcome {
        if self.config.reject_implausible && !candidate.score.is_plausible() {
            trace!("rejecting implausible {} by {}", candidate.score, candidate.author);
            return Outcome::Implausible;
        }

        let fields = &self.config.fields;
        if self.members.iter().any(|member| dominates(&member.score, &candidate.score, fields)) {
            return Outcome::Dominated;
        }

        let before = self.members.len();
        self.members.retain(|member| !dominates(&candidate.score, &member.score, fields));
        let evicted = before - self.members.len();

        self.members.push(candidate);
        Outcome::Inserted { evicted }
    }

    /// Members sorted by cycles, then reactors, then symbols.
    ///
    /// Ties beyond those keep arrival order.
    pub fn members(&self) -> Vec<&Candidate> {
        self.members.iter()
            .sorted_by_key(|member| sort_key(&member.score))
            .collect_vec()
    }

    /// Consume the frontier, yielding [`Self::members`] by value.
    pub fn into_members(self) -> Vec<Candidate> {
        self.members.into_iter()
            .sorted_by_key(|member| sort_key(&member.score))
            .collect_vec()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing was ever accepted.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn sort_key(score: &Score) -> (u32, u32, u32) {
    (score.cycles, score.reactors, score.symbols)
}

/// Independent [`Frontier`]s keyed by level.
///
/// Levels iterate in key order, so output built from this is stable.
#[derive(Clone, Debug)]
pub struct FrontierMaintainer<L: Ord> {
    config: FrontierConfig,
    levels: BTreeMap<L, Frontier>,
}

impl<L: Ord> FrontierMaintainer<L> {
    /// Every level's frontier will use `config`.
    pub fn new(config: FrontierConfig) -> Self {
        Self { config, levels: BTreeMap::new() }
    }

    /// Offer `candidate` to the frontier of `level`.
    ///
    /// A level is created on first acceptance, so levels offered only rejected candidates stay absent.
    pub fn consider(&mut self, level: L, candidate: Candidate) -> Outcome {
        match self.levels.get_mut(&level) {
            Some(frontier) => frontier.consider(candidate),
            None => {
                let mut frontier = Frontier::new(self.config.clone());
                let outcome = frontier.consider(candidate);
                if !frontier.is_empty() {
                    self.levels.insert(level, frontier);
                }
                outcome
            }
        }
    }

    /// The sorted frontier of `level`; empty if it has none.
    pub fn current_frontier(&self, level: &L) -> Vec<&Candidate> {
        self.levels.get(level).map(Frontier::members).unwrap_or_default()
    }

    /// Levels with at least one member, in order.
    pub fn levels(&self) -> impl Iterator<Item = &L> {
        self.levels.keys()
    }

    /// Every level with its sorted frontier, in level order.
    pub fn into_frontiers(self) -> impl Iterator<Item = (L, Vec<Candidate>)> {
        self.levels.into_iter().map(|(level, frontier)| (level, frontier.into_members()))
    }
}

impl<L: Ord> Default for FrontierMaintainer<L> {
    fn default() -> Self {
        Self::new(FrontierConfig::default())
    }
}

impl<L: Ord> Extend<(L, Candidate)> for FrontierMaintainer<L> {
    fn extend<T: IntoIterator<Item = (L, Candidate)>>(&mut self, iter: T) {
        for (level, candidate) in iter {
            self.consider(level, candidate);
        }
    }
}

impl<L: Ord> FromIterator<(L, Candidate)> for FrontierMaintainer<L> {
    fn from_iter<T: IntoIterator<Item = (L, Candidate)>>(iter: T) -> Self {
        let mut maintainer = Self::default();
        maintainer.extend(iter);
        maintainer
    }
}
