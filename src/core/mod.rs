//! Core value types: geometry, player colors, configuration and RNG.
//!
//! These carry no game rules of their own; the tile, area and board modules
//! build on them.

pub mod geometry;
pub mod player;
pub mod config;
pub mod rng;

pub use geometry::{Direction, Pos, Rotation};
pub use player::PlayerColor;
pub use config::{RulesConfig, DEFAULT_REACH};
pub use rng::GameRng;
