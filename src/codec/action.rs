//! Compact codes for player actions.
//!
//! ## Codes
//!
//! - Placing a tile: two digits holding `(position << 2) | rotation`, where
//!   `position` indexes the board's insertion positions in (x, y) order and
//!   `rotation` counts clockwise quarter turns.
//! - Occupying: one digit holding `(kind << 4) | local zone id`.
//! - Taking a pawn back: one digit indexing the board's occupants in zone id
//!   order.
//!
//! The all-ones digit (`7`) means no occupant in both occupant codes, so
//! only the first 31 occupants can be taken back through a code. Encoding
//! an index past what its digits hold fails with `CodeOutOfRange`.
//!
//! ## Decoding
//!
//! Decoding trusts nothing. Any malformed or illegal code yields the single
//! `InvalidAction` error and the state it was applied to stays as it was.

use thiserror::Error;
use tracing::debug;

use super::base32;
use crate::board::Board;
use crate::core::{Pos, Rotation};
use crate::error::{RulesError, RulesResult};
use crate::game::{GameState, NextAction};
use crate::tiles::{Occupant, OccupantKind, PlacedTile};

/// Occupant code for "none".
pub const NO_OCCUPANT: u32 = 0b1_1111;

/// Insertion positions a placement code can index.
const MAX_POSITIONS: usize = 1 << 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid action")]
pub struct InvalidAction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action {index} ({code:?}) is invalid")]
pub struct ReplayError {
    pub index: usize,
    pub code: String,
}

/// A state together with the code of the action that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateAction {
    pub state: GameState,
    pub code: String,
}

fn ordered_positions(board: &Board) -> Vec<Pos> {
    board.insertion_positions().into_iter().collect()
}

fn ordered_occupants(board: &Board) -> Vec<Occupant> {
    let mut occupants: Vec<Occupant> = board.occupants().into_iter().collect();
    occupants.sort_by_key(|occupant| occupant.zone_id);
    occupants
}

fn occupant_code(occupant: Option<Occupant>) -> u32 {
    occupant.map_or(NO_OCCUPANT, |o| (o.kind as u32) << 4 | u32::from(o.zone_id.local_id()))
}

/// Place a tile and encode the placement.
pub fn with_placed_tile(state: &GameState, tile: PlacedTile) -> RulesResult<StateAction> {
    let index = ordered_positions(state.board())
        .iter()
        .position(|&pos| pos == tile.pos)
        .ok_or(RulesError::IllegalPlacement {
            tile: tile.id(),
            pos: tile.pos,
        })?;
    if index >= MAX_POSITIONS {
        return Err(RulesError::CodeOutOfRange(index));
    }
    let code = base32::encode_bits10((index as u32) << 2 | tile.rotation.quarter_turns_cw() as u32);
    Ok(StateAction {
        state: state.with_placed_tile(tile)?,
        code,
    })
}

/// Occupy the last placed tile, or decline, and encode the choice.
pub fn with_new_occupant(state: &GameState, occupant: Option<Occupant>) -> RulesResult<StateAction> {
    Ok(StateAction {
        state: state.with_new_occupant(occupant)?,
        code: base32::encode_bits5(occupant_code(occupant)),
    })
}

/// Take a pawn back, or decline, and encode the choice.
pub fn with_occupant_removed(
    state: &GameState,
    occupant: Option<Occupant>,
) -> RulesResult<StateAction> {
    let value = match occupant {
        None => NO_OCCUPANT,
        Some(occupant) => {
            let index = ordered_occupants(state.board())
                .iter()
                .position(|&o| o == occupant)
                .ok_or(RulesError::OccupantMismatch(occupant.zone_id.tile_id()))?;
            u32::try_from(index)
                .ok()
                .filter(|&value| value < NO_OCCUPANT)
                .ok_or(RulesError::CodeOutOfRange(index))?
        }
    };
    Ok(StateAction {
        state: state.with_occupant_removed(occupant)?,
        code: base32::encode_bits5(value),
    })
}

fn decode_placement(state: &GameState, value: u32) -> Option<StateAction> {
    let positions = ordered_positions(state.board());
    let pos = *positions.get((value >> 2) as usize)?;
    let rotation = Rotation::from_quarter_turns((value & 0b11) as usize);
    let tile = state.tile_to_place()?.clone();
    let placed = PlacedTile::new(tile, state.current_player(), rotation, pos);
    if !state.board().can_add_tile(&placed) {
        return None;
    }
    with_placed_tile(state, placed).ok()
}

fn decode_occupation(state: &GameState, value: u32) -> Option<StateAction> {
    if value == NO_OCCUPANT {
        return with_new_occupant(state, None).ok();
    }
    let kind = if value >> 4 == 1 {
        OccupantKind::Hut
    } else {
        OccupantKind::Pawn
    };
    let local_id = (value & 0b1111) as u8;
    if local_id > 9 {
        return None;
    }
    let tile = state.board().last_placed_tile()?;
    let occupant = Occupant::new(kind, tile.id().zone(local_id));
    if !state.last_tile_potential_occupants().ok()?.contains(&occupant) {
        return None;
    }
    with_new_occupant(state, Some(occupant)).ok()
}

fn decode_retake(state: &GameState, value: u32) -> Option<StateAction> {
    if value == NO_OCCUPANT {
        return with_occupant_removed(state, None).ok();
    }
    let occupant = *ordered_occupants(state.board()).get(value as usize)?;
    let owner = state.board().tile_with_id(occupant.zone_id.tile_id()).ok()?.placer;
    if occupant.kind != OccupantKind::Pawn || owner != state.current_player() {
        return None;
    }
    with_occupant_removed(state, Some(occupant)).ok()
}

fn try_decode_and_apply(state: &GameState, code: &str) -> Option<StateAction> {
    if !base32::is_valid(code) {
        return None;
    }
    let value = base32::decode(code)?;
    match (state.next_action(), code.len()) {
        (NextAction::PlaceTile, 2) => decode_placement(state, value),
        (NextAction::OccupyTile, 1) => decode_occupation(state, value),
        (NextAction::RetakePawn, 1) => decode_retake(state, value),
        _ => None,
    }
}

/// Decode an action code and apply it to `state`.
pub fn decode_and_apply(state: &GameState, code: &str) -> Result<StateAction, InvalidAction> {
    try_decode_and_apply(state, code).ok_or_else(|| {
        debug!(code, action = ?state.next_action(), "rejected action code");
        InvalidAction
    })
}

/// Apply recorded action codes in order.
pub fn replay<S: AsRef<str>>(
    state: &GameState,
    codes: impl IntoIterator<Item = S>,
) -> Result<GameState, ReplayError> {
    let mut current = state.clone();
    for (index, code) in codes.into_iter().enumerate() {
        let code = code.as_ref();
        current = decode_and_apply(&current, code)
            .map_err(|InvalidAction| ReplayError {
                index,
                code: code.to_string(),
            })?
            .state;
    }
    Ok(current)
}
