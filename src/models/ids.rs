//! Match fingerprints.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

use super::{Lineup, Score};

/// Digest bytes kept in an id (16 hex characters).
const ID_BYTES: usize = 8;

/// Fingerprint of a recorded match.
///
/// Derived from the round, both partnerships and the score. Partner order
/// within a team does not change the id; which side a team played on does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn for_match(round: u32, lineup: &Lineup, score: Score) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(round.to_be_bytes());

        for team in [&lineup.team1, &lineup.team2] {
            let pair = team.pair();
            for name in [pair.first(), pair.second()] {
                // Length prefix keeps "ab"+"c" apart from "a"+"bc".
                hasher.update((name.len() as u32).to_be_bytes());
                hasher.update(name.as_bytes());
            }
        }

        hasher.update(score.team1.to_be_bytes());
        hasher.update(score.team2.to_be_bytes());

        Self(hex::encode(&hasher.finalize()[..ID_BYTES]))
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
