//! # Doubles Tracker
//!
//! Round-robin doubles tracker for a small fixed group of 4 to 8 players.
//! Each round four players form two teams of two, the result is validated
//! and recorded, and the next pairing is suggested by a fairness heuristic.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (roster, stats, fairness counters, matches)
//! - **schedule**: Candidate lineup generation and fairness scoring
//! - **validate**: Score validation
//! - **calculate**: Applying results and leaderboard ordering
//! - **session**: Session state and the per-round result flow
//! - **console**: Interactive terminal front end
//! - **storage**: JSONL recap export
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod console;
pub mod models;
pub mod schedule;
pub mod session;
pub mod storage;
pub mod validate;

pub use models::*;
pub use schedule::{suggest_match, FairnessWeights, Matchmaker};
pub use session::{PendingResult, Session};
pub use validate::{validate_score, RejectionKind, ScoreError};
