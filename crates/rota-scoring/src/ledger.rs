//! Record of every active constraint instance.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use rota_core::{HardSoftScore, ShiftId};

use crate::catalog::MatchFacts;

/// Identity of one constraint instance: catalog index plus facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct MatchKey {
    pub constraint: usize,
    pub facts: MatchFacts,
}

/// Weight and weighted score of a recorded instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchEntry {
    pub weight: i64,
    pub score: HardSoftScore,
}

/// Active instances with a reverse index from shift to the instances it
/// takes part in, so a move retracts in O(k) for k touching instances.
#[derive(Debug, Clone, Default)]
pub(crate) struct MatchLedger {
    matches: HashMap<MatchKey, MatchEntry>,
    shift_to_matches: HashMap<ShiftId, HashSet<MatchKey>>,
}

impl MatchLedger {
    /// Records an instance. Returns the score it adds, or zero if the
    /// instance was already recorded.
    pub fn insert(&mut self, key: MatchKey, entry: MatchEntry) -> HardSoftScore {
        let Entry::Vacant(slot) = self.matches.entry(key) else {
            return HardSoftScore::ZERO;
        };
        slot.insert(entry);
        for shift in key.facts.shifts() {
            self.shift_to_matches.entry(shift).or_default().insert(key);
        }
        entry.score
    }

    /// Removes every instance involving `shift`. Returns the sum of their
    /// scores.
    pub fn retract_shift(&mut self, shift: ShiftId) -> HardSoftScore {
        let Some(keys) = self.shift_to_matches.remove(&shift) else {
            return HardSoftScore::ZERO;
        };
        let mut retracted = HardSoftScore::ZERO;
        for key in keys {
            if let Some(entry) = self.matches.remove(&key) {
                retracted += entry.score;
            }
            for other in key.facts.shifts().filter(|&other| other != shift) {
                if let Some(other_keys) = self.shift_to_matches.get_mut(&other) {
                    other_keys.remove(&key);
                    if other_keys.is_empty() {
                        self.shift_to_matches.remove(&other);
                    }
                }
            }
        }
        retracted
    }

    /// Sum of every recorded score.
    pub fn total(&self) -> HardSoftScore {
        self.matches.values().map(|entry| entry.score).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MatchKey, &MatchEntry)> {
        self.matches.iter()
    }

    /// Number of instances involving `shift`.
    pub fn count_for(&self, shift: ShiftId) -> usize {
        self.shift_to_matches.get(&shift).map_or(0, HashSet::len)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn clear(&mut self) {
        self.matches.clear();
        self.shift_to_matches.clear();
    }
}
