//! Partnership, opposition and rest counters that drive match suggestions.

use std::collections::HashMap;

use tracing::debug;

use super::Lineup;

/// Order-insensitive pair of player names.
///
/// The two names are stored sorted, so `new(a, b) == new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnorderedPair(String, String);

impl UnorderedPair {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }

    pub fn first(&self) -> &str {
        &self.0
    }

    pub fn second(&self) -> &str {
        &self.1
    }
}

/// Session-wide fairness counters. All counts start at zero and only grow.
#[derive(Debug, Clone, Default)]
pub struct FairnessTracker {
    partners: HashMap<UnorderedPair, u32>,
    opponents: HashMap<UnorderedPair, u32>,
    rests: HashMap<String, u32>,
}

impl FairnessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `a` and `b` have played on the same team.
    pub fn partner_count(&self, a: &str, b: &str) -> u32 {
        self.partners
            .get(&UnorderedPair::new(a, b))
            .copied()
            .unwrap_or(0)
    }

    /// Times `a` and `b` have played against each other.
    pub fn opponent_count(&self, a: &str, b: &str) -> u32 {
        self.opponents
            .get(&UnorderedPair::new(a, b))
            .copied()
            .unwrap_or(0)
    }

    /// Rounds `player` has sat out.
    pub fn rest_count(&self, player: &str) -> u32 {
        self.rests.get(player).copied().unwrap_or(0)
    }

    /// Apply one confirmed match: both partnerships, the four cross-team
    /// oppositions, and a rest for everyone sitting out.
    pub fn record(&mut self, lineup: &Lineup) {
        for team in [&lineup.team1, &lineup.team2] {
            *self.partners.entry(team.pair()).or_insert(0) += 1;
        }

        for x in lineup.team1.iter() {
            for y in lineup.team2.iter() {
                *self.opponents.entry(UnorderedPair::new(x, y)).or_insert(0) += 1;
            }
        }

        for player in &lineup.resting {
            *self.rests.entry(player.clone()).or_insert(0) += 1;
        }

        debug!(
            "Fairness updated: {} partnerships, {} oppositions, {} resting",
            self.partners.len(),
            self.opponents.len(),
            lineup.resting.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Roster;
    use pretty_assertions::assert_eq;

    fn five() -> Roster {
        Roster::new(["Aiko", "Ben", "Cara", "Dev", "Eli"]).unwrap()
    }

    #[test]
    fn test_unordered_pair_canonical() {
        let p = UnorderedPair::new("Zed", "Amy");
        assert_eq!(p, UnorderedPair::new("Amy", "Zed"));
        assert_eq!(p.first(), "Amy");
        assert_eq!(p.second(), "Zed");
    }

    #[test]
    fn test_tracker_starts_empty() {
        let tracker = FairnessTracker::new();
        assert_eq!(tracker.partner_count("Aiko", "Ben"), 0);
        assert_eq!(tracker.opponent_count("Aiko", "Ben"), 0);
        assert_eq!(tracker.rest_count("Eli"), 0);
    }

    #[test]
    fn test_record_increments_exactly_the_touched_counters() {
        let roster = five();
        let lineup = roster.select(&[0, 1, 2, 3]).unwrap();
        let mut tracker = FairnessTracker::new();
        tracker.record(&lineup);

        assert_eq!(tracker.partner_count("Aiko", "Ben"), 1);
        assert_eq!(tracker.partner_count("Dev", "Cara"), 1);
        assert_eq!(tracker.partner_count("Aiko", "Cara"), 0);

        for (x, y) in [("Aiko", "Cara"), ("Aiko", "Dev"), ("Ben", "Cara"), ("Ben", "Dev")] {
            assert_eq!(tracker.opponent_count(x, y), 1);
            assert_eq!(tracker.opponent_count(y, x), 1);
        }
        assert_eq!(tracker.opponent_count("Aiko", "Ben"), 0);

        assert_eq!(tracker.rest_count("Eli"), 1);
        assert_eq!(tracker.rest_count("Aiko"), 0);

        assert_eq!(tracker.partners.len(), 2);
        assert_eq!(tracker.opponents.values().sum::<u32>(), 4);
    }

    #[test]
    fn test_record_accumulates() {
        let roster = five();
        let mut tracker = FairnessTracker::new();
        tracker.record(&roster.select(&[0, 1, 2, 3]).unwrap());
        tracker.record(&roster.select(&[1, 0, 4, 2]).unwrap());

        assert_eq!(tracker.partner_count("Aiko", "Ben"), 2);
        assert_eq!(tracker.opponent_count("Aiko", "Cara"), 2);
        assert_eq!(tracker.rest_count("Eli"), 1);
        assert_eq!(tracker.rest_count("Dev"), 1);
    }
}
