//! Scoring rules and game results.
//!
//! `points` holds the pure arithmetic mapping area contents to points;
//! `outcome` decides who won once every message has been tallied.

pub mod points;
pub mod outcome;

pub use outcome::GameResult;
