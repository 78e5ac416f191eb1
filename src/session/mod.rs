//! Session state and the per-round result flow.
//!
//! A round goes through:
//! 1. A lineup is suggested by the matchmaker or picked by hand
//! 2. A winner and score are proposed and validated into a [`PendingResult`]
//! 3. The pending result is either confirmed, which updates stats, fairness
//!    and history together, or declined, which changes nothing
//!
//! Nothing is written before confirmation, so a declined or rejected result
//! needs no rollback.

use tracing::info;

use crate::calculate::{apply_result, leaderboard, update_fairness};
use crate::models::{
    FairnessTracker, LeaderboardRow, Lineup, MatchHistory, MatchRecord, Roster, Score,
    SelectionError, Side, StatsTable,
};
use crate::schedule::{FairnessWeights, Matchmaker};
use crate::validate::{validate_score, ScoreError};

/// A validated result waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResult {
    round: u32,
    lineup: Lineup,
    winner: Side,
    score: Score,
}

impl PendingResult {
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn winner(&self) -> Side {
        self.winner
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Throw the result away and get the lineup back for re-entry.
    pub fn decline(self) -> Lineup {
        self.lineup
    }
}

/// Everything a tournament session owns.
#[derive(Debug, Clone)]
pub struct Session {
    roster: Roster,
    stats: StatsTable,
    fairness: FairnessTracker,
    history: MatchHistory,
    matchmaker: Matchmaker,
}

impl Session {
    pub fn new(roster: Roster, weights: FairnessWeights) -> Self {
        let stats = StatsTable::new(&roster);
        info!("New session with {} players", roster.len());
        Self {
            roster,
            stats,
            fairness: FairnessTracker::new(),
            history: MatchHistory::new(),
            matchmaker: Matchmaker::new(weights),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn stats(&self) -> &StatsTable {
        &self.stats
    }

    pub fn fairness(&self) -> &FairnessTracker {
        &self.fairness
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    /// Round number of the match currently being played.
    pub fn next_round(&self) -> u32 {
        self.history.next_round()
    }

    /// The matchmaker's pick for the next round.
    pub fn suggest(&self) -> Lineup {
        self.matchmaker
            .suggest(&self.roster, &self.fairness, &self.stats)
    }

    /// A hand-picked lineup from 0-based roster positions.
    pub fn select(&self, indices: &[usize]) -> Result<Lineup, SelectionError> {
        self.roster.select(indices)
    }

    /// Validate a result for `lineup` without touching any state.
    pub fn propose(
        &self,
        lineup: Lineup,
        winner: Side,
        s1: u32,
        s2: u32,
    ) -> Result<PendingResult, ScoreError> {
        let score = validate_score(winner, s1, s2)?;
        Ok(PendingResult {
            round: self.next_round(),
            lineup,
            winner,
            score,
        })
    }

    /// Commit a pending result to stats, fairness and history.
    pub fn confirm(&mut self, pending: PendingResult) -> &MatchRecord {
        let PendingResult {
            round,
            lineup,
            winner,
            score,
        } = pending;

        apply_result(&mut self.stats, &lineup, winner, score);
        update_fairness(&mut self.fairness, &lineup);
        info!(
            "Round {}: {} beat {} {}",
            round,
            lineup.team(winner),
            lineup.team(winner.opponent()),
            score
        );
        self.history.record(round, &lineup, winner, score)
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        leaderboard(&self.stats)
    }

    pub fn recap(&self) -> &[MatchRecord] {
        self.history.as_slice()
    }
}
