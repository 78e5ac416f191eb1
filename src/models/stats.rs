//! Per-player statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Roster;

/// Aggregate counters for one player.
///
/// `played == wins + losses` and `points == wins` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub played: u32,
    pub points: u32,
    pub points_for: u32,
    pub points_against: u32,
}

impl PlayerStats {
    /// Average points scored per game, 0.0 before the first game.
    pub fn points_for_avg(&self) -> f64 {
        average(self.points_for, self.played)
    }

    /// Average points conceded per game, 0.0 before the first game.
    pub fn points_against_avg(&self) -> f64 {
        average(self.points_against, self.played)
    }
}

fn average(total: u32, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        total as f64 / games as f64
    }
}

/// Stats for every roster player, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    players: HashMap<String, PlayerStats>,
}

impl StatsTable {
    /// Zeroed stats for each roster player.
    pub fn new(roster: &Roster) -> Self {
        Self {
            players: roster
                .iter()
                .map(|p| (p.to_string(), PlayerStats::default()))
                .collect(),
        }
    }

    pub fn get(&self, player: &str) -> Option<&PlayerStats> {
        self.players.get(player)
    }

    /// Games played by `player`, 0 for unknown names.
    pub fn played(&self, player: &str) -> u32 {
        self.players.get(player).map(|s| s.played).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PlayerStats)> {
        self.players.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Mutable access for the result applier.
    pub(crate) fn entry_mut(&mut self, player: &str) -> &mut PlayerStats {
        self.players.entry(player.to_string()).or_default()
    }
}

/// One ranked leaderboard line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// 1-based position
    pub rank: usize,

    pub name: String,

    #[serde(flatten)]
    pub stats: PlayerStats,

    /// points_for / played
    pub points_for_avg: f64,

    /// points_against / played
    pub points_against_avg: f64,
}

impl LeaderboardRow {
    pub fn new(rank: usize, name: &str, stats: &PlayerStats) -> Self {
        Self {
            rank,
            name: name.to_string(),
            stats: *stats,
            points_for_avg: stats.points_for_avg(),
            points_against_avg: stats.points_against_avg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_table_starts_zeroed() {
        let roster = Roster::new(["Aiko", "Ben", "Cara", "Dev"]).unwrap();
        let table = StatsTable::new(&roster);

        assert_eq!(table.len(), 4);
        for (_, stats) in table.iter() {
            assert_eq!(*stats, PlayerStats::default());
        }
        assert_eq!(table.played("Aiko"), 0);
        assert!(table.get("Zed").is_none());
    }

    #[test]
    fn test_averages_zero_games() {
        let stats = PlayerStats::default();
        assert_eq!(stats.points_for_avg(), 0.0);
        assert_eq!(stats.points_against_avg(), 0.0);
    }

    #[test]
    fn test_averages() {
        let stats = PlayerStats {
            wins: 1,
            losses: 1,
            played: 2,
            points: 1,
            points_for: 18,
            points_against: 21,
        };
        assert!((stats.points_for_avg() - 9.0).abs() < f64::EPSILON);
        assert!((stats.points_against_avg() - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leaderboard_row_serialization_flattens_stats() {
        let stats = PlayerStats {
            wins: 2,
            losses: 0,
            played: 2,
            points: 2,
            points_for: 22,
            points_against: 10,
        };
        let row = LeaderboardRow::new(1, "Aiko", &stats);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["rank"], 1);
        assert_eq!(json["wins"], 2);
        assert_eq!(json["points_for_avg"], 11.0);
    }
}
