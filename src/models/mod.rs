//! Core data models for the doubles tracker.

mod fairness;
mod ids;
mod matches;
mod player;
mod stats;

pub use fairness::*;
pub use ids::*;
pub use matches::*;
pub use player::*;
pub use stats::*;
