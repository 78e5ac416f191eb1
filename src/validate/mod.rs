//! Result validation.
//!
//! A game is won by reaching 11 with a margin of at least two, or at 12
//! when the other side has 10 or 11. No score may exceed 12.

use thiserror::Error;

use crate::models::{Score, Side};

/// Highest score either side can post.
pub const MAX_SCORE: u32 = 12;

/// Standard winning score.
pub const GAME_POINT: u32 = 11;

/// Minimum margin for a standard win.
pub const MIN_MARGIN: u32 = 2;

/// Broad reason a score was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    OutOfRange,
    WinnerMismatch,
    InvalidMargin,
}

/// A submitted score that cannot stand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("Scores must be <= {max} (got {0}-{1}).", max = MAX_SCORE)]
    OutOfRange(u32, u32),

    #[error("{0} was marked the winner, so its score must be higher.")]
    WinnerMismatch(Side),

    #[error("At 11 the margin must be >= 2 (e.g., 11-9), got {hi}-{lo}.")]
    MarginTooSmall { hi: u32, lo: u32 },

    #[error("At 12 the other side must be 10 or 11, got {hi}-{lo}.")]
    InvalidDeuce { hi: u32, lo: u32 },

    #[error("Winning score must be 11 or 12, got {0}.")]
    NoWinningScore(u32),
}

impl ScoreError {
    pub fn kind(&self) -> RejectionKind {
        match self {
            ScoreError::OutOfRange(..) => RejectionKind::OutOfRange,
            ScoreError::WinnerMismatch(_) => RejectionKind::WinnerMismatch,
            ScoreError::MarginTooSmall { .. }
            | ScoreError::InvalidDeuce { .. }
            | ScoreError::NoWinningScore(_) => RejectionKind::InvalidMargin,
        }
    }
}

/// Check a score against the declared winner and the two win conditions.
///
/// Rules are applied in order and the first failure is returned.
pub fn validate_score(winner: Side, s1: u32, s2: u32) -> Result<Score, ScoreError> {
    if s1 > MAX_SCORE || s2 > MAX_SCORE {
        return Err(ScoreError::OutOfRange(s1, s2));
    }

    let score = Score::new(s1, s2);
    if score.of(winner) <= score.of(winner.opponent()) {
        return Err(ScoreError::WinnerMismatch(winner));
    }

    let (hi, lo) = score.ordered();
    match hi {
        GAME_POINT if hi - lo < MIN_MARGIN => Err(ScoreError::MarginTooSmall { hi, lo }),
        GAME_POINT => Ok(score),
        MAX_SCORE if lo == 10 || lo == 11 => Ok(score),
        MAX_SCORE => Err(ScoreError::InvalidDeuce { hi, lo }),
        _ => Err(ScoreError::NoWinningScore(hi)),
    }
}
