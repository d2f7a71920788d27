//! Score analysis types for detailed constraint tracking.
//!
//! This module provides types for analyzing constraint matches in detail,
//! including which facts are involved in each match, score explanations,
//! and fact-level indictments.

use std::collections::HashMap;
use std::fmt;

use rota_core::{
    AvailabilityId, ConstraintRef, EmployeeId, HardSoftScore, ImpactType, ScoreLevel, ShiftId,
};

use crate::catalog::{ConstraintCatalog, MatchFacts};


/// Reference to a fact involved in a constraint match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactRef {
    Shift(ShiftId),
    Employee(EmployeeId),
    Availability(AvailabilityId),
}

impl FactRef {
    /// Facts of a match, followed by the employee the shifts are assigned to.
    pub fn of_match(facts: MatchFacts, employee: EmployeeId) -> Vec<FactRef> {
        let mut refs = match facts {
            MatchFacts::Shift(shift) => vec![FactRef::Shift(shift)],
            MatchFacts::ShiftPair(a, b) => vec![FactRef::Shift(a), FactRef::Shift(b)],
            MatchFacts::ShiftAvailability(shift, availability) => vec![
                FactRef::Shift(shift),
                FactRef::Availability(availability),
            ],
        };
        refs.push(FactRef::Employee(employee));
        refs
    }
}

impl fmt::Display for FactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactRef::Shift(id) => write!(f, "{}", id),
            FactRef::Employee(id) => write!(f, "{}", id),
            FactRef::Availability(id) => write!(f, "{}", id),
        }
    }
}

/// One active constraint instance and its weighted contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatch {
    /// Reference to the constraint that matched.
    pub constraint_ref: ConstraintRef,
    pub level: ScoreLevel,
    /// Identity of the matched facts.
    pub facts: MatchFacts,
    /// Facts involved, employee last.
    pub justification: Vec<FactRef>,
    /// Match weight before multiplier and sign.
    pub weight: i64,
    /// Score impact of this match.
    pub score: HardSoftScore,
}

impl ConstraintMatch {
    /// Human-readable list of the involved facts.
    pub fn description(&self) -> String {
        self.justification
            .iter()
            .map(FactRef::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Per-constraint breakdown in a score explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintAnalysis {
    /// Constraint reference.
    pub constraint_ref: ConstraintRef,
    pub level: ScoreLevel,
    pub impact: ImpactType,
    pub multiplier: i64,
    /// Score of a match of weight 1.
    pub weight: HardSoftScore,
    /// Total score from this constraint.
    pub score: HardSoftScore,
    /// All matches for this constraint.
    pub matches: Vec<ConstraintMatch>,
}

impl ConstraintAnalysis {
    /// Returns the number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    pub fn is_hard(&self) -> bool {
        self.level.is_hard()
    }
}

/// Complete score explanation with per-constraint breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExplanation {
    /// The total score.
    pub score: HardSoftScore,
    /// Per-constraint breakdown, in catalog order.
    pub constraint_analyses: Vec<ConstraintAnalysis>,
}

impl ScoreExplanation {
    /// Groups matches under every constraint of the catalog, including
    /// constraints without matches.
    pub fn from_matches(
        score: HardSoftScore,
        catalog: &ConstraintCatalog,
        matches: Vec<ConstraintMatch>,
    ) -> Self {
        let mut constraint_analyses: Vec<ConstraintAnalysis> = catalog
            .descriptors()
            .iter()
            .map(|descriptor| ConstraintAnalysis {
                constraint_ref: descriptor.constraint_ref.clone(),
                level: descriptor.level,
                impact: descriptor.impact,
                multiplier: descriptor.multiplier,
                weight: descriptor.score_of(1),
                score: HardSoftScore::ZERO,
                matches: Vec::new(),
            })
            .collect();

        for m in matches {
            if let Some(analysis) = constraint_analyses
                .iter_mut()
                .find(|a| a.constraint_ref == m.constraint_ref)
            {
                analysis.score += m.score;
                analysis.matches.push(m);
            }
        }

        Self {
            score,
            constraint_analyses,
        }
    }

    /// Returns the total match count across all constraints.
    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    /// Returns constraints with non-zero scores.
    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.score != HardSoftScore::ZERO)
            .collect()
    }

    /// Returns all matches across all constraints.
    pub fn all_matches(&self) -> Vec<&ConstraintMatch> {
        self.constraint_analyses
            .iter()
            .flat_map(|a| &a.matches)
            .collect()
    }

    /// Looks up the analysis of a constraint by short name.
    pub fn get(&self, name: &str) -> Option<&ConstraintAnalysis> {
        self.constraint_analyses.iter().find(|a| a.name() == name)
    }
}

/// Analysis of how a single fact impacts the score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indictment {
    /// The fact being analyzed.
    pub fact: FactRef,
    /// Total score impact of matches involving this fact.
    pub score: HardSoftScore,
    /// Matches involving this fact, grouped by constraint.
    pub constraint_matches: HashMap<ConstraintRef, Vec<ConstraintMatch>>,
}

impl Indictment {
    pub fn new(fact: FactRef) -> Self {
        Self {
            fact,
            score: HardSoftScore::ZERO,
            constraint_matches: HashMap::new(),
        }
    }

    /// Adds a match to this indictment.
    pub fn add_match(&mut self, constraint_match: ConstraintMatch) {
        self.score += constraint_match.score;
        self.constraint_matches
            .entry(constraint_match.constraint_ref.clone())
            .or_default()
            .push(constraint_match);
    }

    /// Returns the total number of matches.
    pub fn match_count(&self) -> usize {
        self.constraint_matches.values().map(Vec::len).sum()
    }

    /// Returns the number of distinct constraints matched.
    pub fn constraint_count(&self) -> usize {
        self.constraint_matches.len()
    }
}

/// Map of fact indictments for analyzing which facts cause violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndictmentMap {
    /// Indictments keyed by fact.
    pub indictments: HashMap<FactRef, Indictment>,
}

impl IndictmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an indictment map from a collection of matches.
    pub fn from_matches(matches: &[ConstraintMatch]) -> Self {
        let mut map = Self::new();
        for m in matches {
            for &fact in &m.justification {
                map.indictments
                    .entry(fact)
                    .or_insert_with(|| Indictment::new(fact))
                    .add_match(m.clone());
            }
        }
        map
    }

    pub fn get(&self, fact: &FactRef) -> Option<&Indictment> {
        self.indictments.get(fact)
    }

    /// Returns all indicted facts.
    pub fn facts(&self) -> impl Iterator<Item = &FactRef> {
        self.indictments.keys()
    }

    /// Returns facts sorted by worst score impact (most negative first).
    pub fn worst_facts(&self) -> Vec<FactRef> {
        let mut facts: Vec<_> = self.indictments.keys().copied().collect();
        facts.sort_by(|a, b| {
            self.indictments[a]
                .score
                .cmp(&self.indictments[b].score)
                .then_with(|| a.cmp(b))
        });
        facts
    }

    pub fn len(&self) -> usize {
        self.indictments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indictments.is_empty()
    }
}
