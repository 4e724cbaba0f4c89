//! Action codes for replay and transmission.

pub mod base32;
pub mod action;

pub use action::{
    decode_and_apply, replay, with_new_occupant, with_occupant_removed, with_placed_tile,
    InvalidAction, ReplayError, StateAction, NO_OCCUPANT,
};
