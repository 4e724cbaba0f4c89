//! Shared fixtures for integration tests.
//!
//! Tiles follow one local id convention: meadows use 0 and 2, forests and
//! rivers use 1, lakes use 8. Animals are numbered `zone_id * 10 + n`.

#![allow(dead_code)]

use std::sync::Arc;

use stoneage_tiles::core::{PlayerColor, Pos, Rotation};
use stoneage_tiles::game::{GameState, NextAction, PlainPhrases};
use stoneage_tiles::tiles::{
    Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, PlacedTile, River, SpecialPower, Tile,
    TileDecks, TileId, TileKind, TileSide,
};

pub const START_ID: u32 = 56;

pub fn meadow(tile: u32, local: u8, animals: &[AnimalKind]) -> Meadow {
    let id = TileId::new(tile).zone(local);
    Meadow::new(
        id,
        animals
            .iter()
            .enumerate()
            .map(|(n, &kind)| Animal::new(id.raw() * 10 + n as u32, kind)),
    )
}

fn forest(tile: u32, kind: ForestKind) -> Forest {
    Forest::new(TileId::new(tile).zone(1), kind)
}

fn uniform(id: u32, kind: TileKind, side: TileSide) -> Tile {
    Tile::new(TileId::new(id), kind, side.clone(), side.clone(), side.clone(), side)
}

/// Forest to the north, one empty meadow on the other three sides.
pub fn start_tile() -> Tile {
    let m = meadow(START_ID, 0, &[]);
    Tile::new(
        TileId::new(START_ID),
        TileKind::Start,
        TileSide::Forest(forest(START_ID, ForestKind::Plain)),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m),
    )
}

/// A single meadow on all four sides.
pub fn meadow_tile(id: u32, animals: &[AnimalKind], power: Option<SpecialPower>) -> Tile {
    meadow_tile_of_kind(id, TileKind::Normal, animals, power)
}

pub fn meadow_tile_of_kind(
    id: u32,
    kind: TileKind,
    animals: &[AnimalKind],
    power: Option<SpecialPower>,
) -> Tile {
    let mut m = meadow(id, 0, animals);
    if let Some(power) = power {
        m = m.with_special_power(power);
    }
    uniform(id, kind, TileSide::Meadow(m))
}

/// Meadow 0 to the north and west, meadow 2 to the east and south. In a
/// row along x, each tile's meadow 2 only joins the next tile's meadow 0.
pub fn split_meadow(id: u32) -> Tile {
    let west = meadow(id, 0, &[]);
    let east = meadow(id, 2, &[]);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::Meadow(west.clone()),
        TileSide::Meadow(east.clone()),
        TileSide::Meadow(east),
        TileSide::Meadow(west),
    )
}

/// A single forest on all four sides.
pub fn forest_tile(id: u32, kind: TileKind) -> Tile {
    uniform(id, kind, TileSide::Forest(forest(id, ForestKind::Plain)))
}

/// Forest running north-south, meadow 0 to the east, meadow 2 to the west.
pub fn forest_corridor(id: u32, kind: ForestKind) -> Tile {
    let f = forest(id, kind);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::Forest(f.clone()),
        TileSide::Meadow(meadow(id, 0, &[])),
        TileSide::Forest(f),
        TileSide::Meadow(meadow(id, 2, &[])),
    )
}

/// Forest ending at the southern edge, meadow 0 elsewhere.
pub fn forest_cap(id: u32, kind: ForestKind) -> Tile {
    let m = meadow(id, 0, &[]);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Forest(forest(id, kind)),
        TileSide::Meadow(m),
    )
}

/// River entering from the north and ending in lake 8; meadow 0 elsewhere.
pub fn lake_end(id: u32, lake_fish: u32, power: Option<SpecialPower>) -> Tile {
    let m = meadow(id, 0, &[]);
    let mut lake = Lake::new(TileId::new(id).zone(8), lake_fish);
    if let Some(power) = power {
        lake = lake.with_special_power(power);
    }
    let river = River::new(TileId::new(id).zone(1), 0).with_lake(lake);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::River {
            meadow1: m.clone(),
            river,
            meadow2: m.clone(),
        },
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m),
    )
}

pub fn decks(normal: Vec<Tile>, menhir: Vec<Tile>) -> TileDecks {
    TileDecks::new([start_tile()], normal, menhir)
}

/// A two-player game (Red then Blue) with the start tile placed.
pub fn started_game(normal: Vec<Tile>, menhir: Vec<Tile>) -> GameState {
    GameState::initial(
        [PlayerColor::Red, PlayerColor::Blue],
        decks(normal, menhir),
        Arc::new(PlainPhrases::new()),
    )
    .with_starting_tile_placed()
    .expect("start tile")
}

/// Place the tile to place for the current player.
pub fn place(state: &GameState, x: i32, y: i32, rotation: Rotation) -> GameState {
    assert_eq!(state.next_action(), NextAction::PlaceTile);
    let tile = state.tile_to_place().cloned().expect("tile to place");
    let placed = PlacedTile::new(tile, state.current_player(), rotation, Pos::new(x, y));
    state.with_placed_tile(placed).expect("legal placement")
}

/// Points per player as recorded on the message board.
pub fn points_of(state: &GameState, player: PlayerColor) -> u32 {
    state
        .message_board()
        .points()
        .get(&player)
        .copied()
        .unwrap_or(0)
}
