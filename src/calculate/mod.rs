//! Statistics calculation.
//!
//! - Applying a confirmed result to the stats table
//! - Updating the fairness counters
//! - Leaderboard ordering

use std::cmp::Reverse;

use tracing::debug;

use crate::models::{
    FairnessTracker, LeaderboardRow, Lineup, PlayerStats, Score, Side, StatsTable,
};

/// Points awarded for each win.
pub const POINTS_PER_WIN: u32 = 1;

/// Credit a confirmed result to all four players.
///
/// The score must already have passed validation for `winner`.
pub fn apply_result(stats: &mut StatsTable, lineup: &Lineup, winner: Side, score: Score) {
    let win_score = score.of(winner);
    let lose_score = score.of(winner.opponent());

    for player in lineup.team(winner).iter() {
        let s = stats.entry_mut(player);
        s.wins += 1;
        s.played += 1;
        s.points += POINTS_PER_WIN;
        s.points_for += win_score;
        s.points_against += lose_score;
    }

    for player in lineup.team(winner.opponent()).iter() {
        let s = stats.entry_mut(player);
        s.losses += 1;
        s.played += 1;
        s.points_for += lose_score;
        s.points_against += win_score;
    }

    debug!("Applied {} win {}", lineup.team(winner), score);
}

/// Record the partnerships, oppositions and rests of a confirmed match.
pub fn update_fairness(fairness: &mut FairnessTracker, lineup: &Lineup) {
    fairness.record(lineup);
}

/// Order players: most points, then most wins, then fewest losses, then name.
pub fn rank(stats: &StatsTable) -> Vec<(&str, &PlayerStats)> {
    let mut rows: Vec<_> = stats.iter().collect();
    rows.sort_by_key(|(name, s)| (Reverse(s.points), Reverse(s.wins), s.losses, *name));
    rows
}

/// Ranked rows with derived per-game averages.
pub fn leaderboard(stats: &StatsTable) -> Vec<LeaderboardRow> {
    rank(stats)
        .into_iter()
        .enumerate()
        .map(|(i, (name, s))| LeaderboardRow::new(i + 1, name, s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Roster;
    use pretty_assertions::assert_eq;

    fn setup() -> (Roster, StatsTable) {
        let roster = Roster::new(["P1", "P2", "P3", "P4"]).unwrap();
        let stats = StatsTable::new(&roster);
        (roster, stats)
    }

    #[test]
    fn test_apply_result_team_one_wins() {
        let (roster, mut stats) = setup();
        let lineup = roster.select(&[0, 1, 2, 3]).unwrap();
        apply_result(&mut stats, &lineup, Side::One, Score::new(11, 7));

        let winner = PlayerStats {
            wins: 1,
            losses: 0,
            played: 1,
            points: 1,
            points_for: 11,
            points_against: 7,
        };
        let loser = PlayerStats {
            wins: 0,
            losses: 1,
            played: 1,
            points: 0,
            points_for: 7,
            points_against: 11,
        };
        assert_eq!(stats.get("P1"), Some(&winner));
        assert_eq!(stats.get("P2"), Some(&winner));
        assert_eq!(stats.get("P3"), Some(&loser));
        assert_eq!(stats.get("P4"), Some(&loser));
    }

    #[test]
    fn test_apply_result_team_two_wins() {
        let (roster, mut stats) = setup();
        let lineup = roster.select(&[0, 1, 2, 3]).unwrap();
        apply_result(&mut stats, &lineup, Side::Two, Score::new(10, 12));

        let p3 = stats.get("P3").unwrap();
        assert_eq!((p3.wins, p3.points, p3.points_for, p3.points_against), (1, 1, 12, 10));
        let p1 = stats.get("P1").unwrap();
        assert_eq!((p1.losses, p1.points, p1.points_for, p1.points_against), (1, 0, 10, 12));
    }

    #[test]
    fn test_apply_result_keeps_invariants() {
        let (roster, mut stats) = setup();
        let results = [
            ([0, 1, 2, 3], Side::One, Score::new(11, 4)),
            ([0, 2, 1, 3], Side::Two, Score::new(9, 11)),
            ([0, 3, 1, 2], Side::One, Score::new(12, 11)),
        ];
        for (idx, winner, score) in results {
            let lineup = roster.select(&idx).unwrap();
            apply_result(&mut stats, &lineup, winner, score);
        }

        for (_, s) in stats.iter() {
            assert_eq!(s.played, s.wins + s.losses);
            assert_eq!(s.points, s.wins);
            assert_eq!(s.played, 3);
        }
    }

    #[test]
    fn test_apply_result_skips_resting_players() {
        let roster = Roster::new(["P1", "P2", "P3", "P4", "P5"]).unwrap();
        let mut stats = StatsTable::new(&roster);
        let lineup = roster.select(&[0, 1, 2, 3]).unwrap();
        apply_result(&mut stats, &lineup, Side::One, Score::new(11, 0));

        assert_eq!(stats.get("P5"), Some(&PlayerStats::default()));
    }

    #[test]
    fn test_update_fairness_delegates_to_tracker() {
        let (roster, _) = setup();
        let lineup = roster.select(&[0, 1, 2, 3]).unwrap();
        let mut fairness = FairnessTracker::new();
        update_fairness(&mut fairness, &lineup);
        assert_eq!(fairness.partner_count("P2", "P1"), 1);
        assert_eq!(fairness.opponent_count("P1", "P4"), 1);
    }

    fn stats_with(rows: &[(&str, u32, u32, u32)]) -> StatsTable {
        let names: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let mut padded = names.clone();
        for extra in ["X1", "X2", "X3", "X4"] {
            if padded.len() < 4 {
                padded.push(extra);
            }
        }
        let roster = Roster::new(&padded).unwrap();
        let mut stats = StatsTable::new(&roster);
        for (name, points, wins, losses) in rows {
            let s = stats.entry_mut(name);
            s.points = *points;
            s.wins = *wins;
            s.losses = *losses;
            s.played = wins + losses;
        }
        stats
    }

    #[test]
    fn test_rank_wins_break_points_tie() {
        let stats = stats_with(&[("A", 3, 2, 1), ("B", 3, 1, 0), ("C", 0, 0, 2), ("D", 0, 0, 3)]);
        let order: Vec<&str> = rank(&stats).into_iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_rank_losses_then_name() {
        let stats = stats_with(&[("Zed", 2, 2, 1), ("Amy", 2, 2, 1), ("Bob", 2, 2, 0), ("Cy", 5, 5, 9)]);
        let order: Vec<&str> = rank(&stats).into_iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec!["Cy", "Bob", "Amy", "Zed"]);
    }

    #[test]
    fn test_leaderboard_rows() {
        let (roster, mut stats) = setup();
        let lineup = roster.select(&[2, 3, 0, 1]).unwrap();
        apply_result(&mut stats, &lineup, Side::One, Score::new(11, 9));

        let rows = leaderboard(&stats);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["P3", "P4", "P1", "P2"]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[3].rank, 4);
        assert!((rows[0].points_for_avg - 11.0).abs() < f64::EPSILON);
        assert!((rows[2].points_against_avg - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_leaderboard_fresh_session_is_alphabetical() {
        let roster = Roster::new(["Dev", "aiko", "Ben", "Cara"]).unwrap();
        let stats = StatsTable::new(&roster);
        let names: Vec<String> = leaderboard(&stats).into_iter().map(|r| r.name).collect();
        // Plain byte order: uppercase sorts before lowercase.
        assert_eq!(names, vec!["Ben", "Cara", "Dev", "aiko"]);
        assert!(leaderboard(&stats).iter().all(|r| r.points_for_avg == 0.0));
    }
}
