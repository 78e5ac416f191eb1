//! Match scheduling.
//!
//! Every way to put four roster players on court as two teams of two is
//! enumerated and scored by a fairness heuristic:
//! - Repeated partnerships cost the most
//! - Repeated opponents next
//! - Then the gap in games played among the four chosen
//! - Then the accumulated rest of whoever would sit out
//!
//! The candidate space is at most `3 * C(8, 4) = 210`, so a linear scan is
//! all that's needed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{FairnessTracker, Lineup, Roster, StatsTable};

/// Penalty weights for the fairness heuristic. Higher weight, stronger
/// preference to avoid that kind of repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FairnessWeights {
    #[serde(default = "default_partner")]
    pub partner: u32,

    #[serde(default = "default_opponent")]
    pub opponent: u32,

    #[serde(default = "default_spread")]
    pub spread: u32,

    #[serde(default = "default_rest")]
    pub rest: u32,
}

fn default_partner() -> u32 {
    10
}

fn default_opponent() -> u32 {
    3
}

fn default_spread() -> u32 {
    2
}

fn default_rest() -> u32 {
    1
}

impl Default for FairnessWeights {
    fn default() -> Self {
        Self {
            partner: default_partner(),
            opponent: default_opponent(),
            spread: default_spread(),
            rest: default_rest(),
        }
    }
}

/// The three ways to split four players into two teams of two.
const SPLITS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 3, 1, 2]];

/// Every candidate lineup, in scan order: quads in ascending combination
/// order, then the three splits of each quad.
pub fn candidates(roster: &Roster) -> Vec<Lineup> {
    let n = roster.len();
    let mut out = Vec::new();

    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    let quad = [a, b, c, d];
                    for split in SPLITS {
                        let idx = [quad[split[0]], quad[split[1]], quad[split[2]], quad[split[3]]];
                        out.push(Lineup::from_indices(roster, idx));
                    }
                }
            }
        }
    }

    out
}

/// Suggests the fairest next lineup from the session's counters.
#[derive(Debug, Clone, Default)]
pub struct Matchmaker {
    weights: FairnessWeights,
}

impl Matchmaker {
    pub fn new(weights: FairnessWeights) -> Self {
        Self { weights }
    }

    /// Fairness score of a lineup; higher is better, 0 is a perfect fresh
    /// pairing.
    pub fn score(&self, lineup: &Lineup, fairness: &FairnessTracker, stats: &StatsTable) -> i64 {
        let w = &self.weights;

        let partners = [&lineup.team1, &lineup.team2]
            .iter()
            .map(|t| {
                let [a, b] = t.members();
                fairness.partner_count(a, b) as i64
            })
            .sum::<i64>();

        let opponents = lineup
            .team1
            .iter()
            .flat_map(|x| lineup.team2.iter().map(move |y| (x, y)))
            .map(|(x, y)| fairness.opponent_count(x, y) as i64)
            .sum::<i64>();

        let played: Vec<u32> = lineup.players().map(|p| stats.played(p)).collect();
        let spread = match (played.iter().max(), played.iter().min()) {
            (Some(max), Some(min)) => (max - min) as i64,
            _ => 0,
        };

        let rest = lineup
            .resting
            .iter()
            .map(|p| fairness.rest_count(p) as i64)
            .sum::<i64>();

        -(w.partner as i64) * partners
            - (w.opponent as i64) * opponents
            - (w.spread as i64) * spread
            - (w.rest as i64) * rest
    }

    /// Pick the best-scoring lineup. Ties go to the first candidate scanned.
    pub fn suggest(&self, roster: &Roster, fairness: &FairnessTracker, stats: &StatsTable) -> Lineup {
        let mut best: Option<(i64, Lineup)> = None;

        for lineup in candidates(roster) {
            let score = self.score(&lineup, fairness, stats);
            let better = best.as_ref().map_or(true, |(top, _)| score > *top);
            if better {
                best = Some((score, lineup));
            }
        }

        match best {
            Some((score, lineup)) => {
                debug!("Suggested {} (score {})", lineup, score);
                lineup
            }
            // A roster always has four players, so the scan is never empty.
            None => Lineup::from_indices(roster, [0, 1, 2, 3]),
        }
    }
}

/// Suggest the next lineup with the given weights.
pub fn suggest_match(
    roster: &Roster,
    fairness: &FairnessTracker,
    stats: &StatsTable,
    weights: FairnessWeights,
) -> Lineup {
    Matchmaker::new(weights).suggest(roster, fairness, stats)
}
