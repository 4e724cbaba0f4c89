//! Rules violations.
//!
//! Every fallible board, partition and game-state operation returns
//! `Result<_, RulesError>`. An error means the caller asked for something the
//! rules forbid; the snapshot the operation was called on is never changed.

use thiserror::Error;

use crate::core::{PlayerColor, Pos};
use crate::game::NextAction;
use crate::tiles::{OccupantKind, TileId, TileKind, ZoneId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("expected a {expected:?} action, got {found:?}")]
    UnexpectedAction { expected: NextAction, found: NextAction },

    #[error("zone {0} is not part of this partition")]
    UnknownZone(ZoneId),

    #[error("area is not part of this partition")]
    UnknownArea,

    #[error("zone {0} is already in the partition")]
    DuplicateZone(ZoneId),

    #[error("area is already occupied")]
    AreaOccupied,

    #[error("area has no occupant of color {0}")]
    MissingOccupant(PlayerColor),

    #[error("connection would leave an area with negative open connections")]
    NegativeOpenConnections,

    #[error("cannot connect sides of different kinds")]
    SideKindMismatch,

    #[error("a {kind:?} cannot occupy zone {zone}")]
    OccupantKindMismatch { kind: OccupantKind, zone: ZoneId },

    #[error("tile {0} is not on the board")]
    UnknownTile(TileId),

    #[error("tile {0} has no zone {1}")]
    ZoneNotOnTile(TileId, ZoneId),

    #[error("tile {0} is already occupied")]
    TileOccupied(TileId),

    #[error("tile {0} was not placed by a player")]
    NoPlacer(TileId),

    #[error("occupant does not match the one on tile {0}")]
    OccupantMismatch(TileId),

    #[error("position {0} is outside the board")]
    OutOfBoard(Pos),

    #[error("tile {tile} cannot be placed at {pos}")]
    IllegalPlacement { tile: TileId, pos: Pos },

    #[error("a tile must be placed without an occupant")]
    PreOccupiedTile,

    #[error("tile {0} is not the tile to place")]
    WrongTile(TileId),

    #[error("only the current player may act")]
    NotCurrentPlayer,

    #[error("only pawns can be taken back")]
    NotAPawn,

    #[error("occupant cannot be placed on the last tile")]
    NotAPotentialOccupant,

    #[error("the {0:?} deck is empty")]
    EmptyDeck(TileKind),

    #[error("no tile has been placed yet")]
    EmptyBoard,

    #[error("index {0} does not fit in an action code")]
    CodeOutOfRange(usize),
}

pub type RulesResult<T> = Result<T, RulesError>;
