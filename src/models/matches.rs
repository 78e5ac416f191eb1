//! Match model: teams, lineups, scores and the append-only history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::{MatchId, Roster, UnorderedPair};

/// One of the two sides of a doubles match. Serialized as `1` or `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Parse the 1/2 winner declaration.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Side::One),
            2 => Some(Side::Two),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Side::One => 1,
            Side::Two => 2,
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        side.number()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

/// Final score, in team 1 / team 2 order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub team1: u32,
    pub team2: u32,
}

impl Score {
    pub fn new(team1: u32, team2: u32) -> Self {
        Self { team1, team2 }
    }

    /// Points scored by the given side.
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::One => self.team1,
            Side::Two => self.team2,
        }
    }

    /// `(hi, lo)` regardless of side.
    pub fn ordered(&self) -> (u32, u32) {
        (self.team1.max(self.team2), self.team1.min(self.team2))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team1, self.team2)
    }
}

/// Two distinct players, kept in entry order for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team([String; 2]);

impl Team {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self([a.into(), b.into()])
    }

    pub fn members(&self) -> [&str; 2] {
        [self.0[0].as_str(), self.0[1].as_str()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Order-insensitive partnership key.
    pub fn pair(&self) -> UnorderedPair {
        UnorderedPair::new(&self.0[0], &self.0[1])
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.0[0], self.0[1])
    }
}

/// Four chosen players split into two teams, plus everyone sitting out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lineup {
    pub team1: Team,
    pub team2: Team,
    pub resting: Vec<String>,
}

impl Lineup {
    /// Build a lineup from four distinct, in-range roster positions.
    ///
    /// Callers outside the crate go through [`Roster::select`], which checks
    /// the indices first.
    pub(crate) fn from_indices(roster: &Roster, idx: [usize; 4]) -> Self {
        let name = |i: usize| roster.names()[i].clone();
        let resting = roster
            .names()
            .iter()
            .enumerate()
            .filter(|(i, _)| !idx.contains(i))
            .map(|(_, p)| p.clone())
            .collect();

        Self {
            team1: Team::new(name(idx[0]), name(idx[1])),
            team2: Team::new(name(idx[2]), name(idx[3])),
            resting,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::One => &self.team1,
            Side::Two => &self.team2,
        }
    }

    /// The four players on court.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.team1.iter().chain(self.team2.iter())
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  vs  {}",
            self.team1.to_string().replace('+', " + "),
            self.team2.to_string().replace('+', " + ")
        )
    }
}

/// A finished, confirmed match. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub id: MatchId,
    pub round: u32,
    pub team1: Team,
    pub team2: Team,
    pub winner: Side,
    pub score: Score,
    pub resting: Vec<String>,
    pub recorded_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(round: u32, lineup: &Lineup, winner: Side, score: Score) -> Self {
        Self {
            id: MatchId::for_match(round, lineup, score),
            round,
            team1: lineup.team1.clone(),
            team2: lineup.team2.clone(),
            winner,
            score,
            resting: lineup.resting.clone(),
            recorded_at: Utc::now(),
        }
    }

    pub fn winning_team(&self) -> &Team {
        match self.winner {
            Side::One => &self.team1,
            Side::Two => &self.team2,
        }
    }
}

/// Ordered, append-only log of recorded matches.
#[derive(Debug, Clone, Default)]
pub struct MatchHistory {
    matches: Vec<MatchRecord>,
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round number the next recorded match should carry.
    pub fn next_round(&self) -> u32 {
        self.matches.len() as u32 + 1
    }

    /// Append a match.
    ///
    /// `round` is expected to equal [`next_round`](Self::next_round); it is
    /// stored as given.
    pub fn record(
        &mut self,
        round: u32,
        lineup: &Lineup,
        winner: Side,
        score: Score,
    ) -> &MatchRecord {
        let record = MatchRecord::new(round, lineup, winner, score);
        debug!("Recording round {} as {}", round, record.id);
        self.matches.push(record);
        &self.matches[self.matches.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchRecord> {
        self.matches.iter()
    }

    pub fn as_slice(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn last(&self) -> Option<&MatchRecord> {
        self.matches.last()
    }
}
