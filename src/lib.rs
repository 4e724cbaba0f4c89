//! # stoneage-tiles
//!
//! Rules engine for a prehistoric tile-placement game: players draw tiles,
//! lay them on a shared grid, put pawns and huts on forests, meadows,
//! rivers and lakes, and score as areas close and when the tiles run out.
//!
//! ## Design Principles
//!
//! 1. **Immutable snapshots**: `Board` and `GameState` are values. Every
//!    operation returns a new snapshot, and clones are O(1) thanks to
//!    `im-rs` persistent collections.
//!
//! 2. **Areas kept incrementally**: placing a tile folds its zones into four
//!    partitions (forests, meadows, rivers, river systems) with one union
//!    per matched edge. Nothing is recomputed from scratch.
//!
//! 3. **Errors, not panics**: rule violations come back as `RulesError`.
//!    Untrusted action codes come back as a single `InvalidAction`.
//!
//! ## Modules
//!
//! - `core`: Positions, directions, rotations, player colors, config, RNG
//! - `tiles`: Zones, animals, tiles, placed tiles, decks
//! - `areas`: Areas and the partitions that group zones into them
//! - `board`: The grid, placement validation and occupant bookkeeping
//! - `rules`: Point values and the game result
//! - `game`: The turn state machine and the message board
//! - `codec`: Base-32 action codes and replay

pub mod core;
pub mod error;
pub mod tiles;
pub mod areas;
pub mod board;
pub mod rules;
pub mod game;
pub mod codec;

// Re-export commonly used types
pub use crate::core::{
    Direction, Pos, Rotation,
    PlayerColor,
    RulesConfig,
    GameRng,
};

pub use crate::error::{RulesError, RulesResult};

pub use crate::tiles::{
    Animal, AnimalKind, SpecialPower,
    Forest, ForestKind, Lake, Meadow, River, Water, Zone, ZoneId, ZoneLike,
    Tile, TileId, TileKind, TileSide,
    Occupant, OccupantKind, PlacedTile,
    TileDecks,
};

pub use crate::areas::{Area, ZonePartition, ZonePartitions};

pub use crate::board::Board;

pub use crate::rules::GameResult;

pub use crate::game::{
    GameState, NextAction,
    Message, MessageBoard,
    PhraseGenerator, PlainPhrases,
};

pub use crate::codec::{InvalidAction, StateAction};
