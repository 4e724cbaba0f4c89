//! Hand-built tiles for unit tests.
//!
//! Zone local ids follow one convention everywhere: meadows use 0 and 2,
//! rivers and forests use 1, lakes use 8.

use super::tile::{Tile, TileKind, TileSide};
use super::zone::{
    Animal, AnimalKind, Forest, ForestKind, Lake, Meadow, River, SpecialPower, TileId,
};

fn meadow(tile: u32, local: u8, animals: impl IntoIterator<Item = AnimalKind>) -> Meadow {
    let id = TileId::new(tile).zone(local);
    let animals = animals
        .into_iter()
        .enumerate()
        .map(|(n, kind)| Animal::new(id.raw() * 10 + n as u32, kind));
    Meadow::new(id, animals)
}

fn forest(tile: u32, kind: ForestKind) -> Forest {
    Forest::new(TileId::new(tile).zone(1), kind)
}

fn all_sides(id: u32, kind: TileKind, side: TileSide) -> Tile {
    Tile::new(TileId::new(id), kind, side.clone(), side.clone(), side.clone(), side)
}

/// Start tile: forest to the north, one meadow elsewhere.
pub fn start_tile() -> Tile {
    let m = meadow(56, 0, []);
    Tile::new(
        TileId::new(56),
        TileKind::Start,
        TileSide::Forest(forest(56, ForestKind::Plain)),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m),
    )
}

/// A single meadow covering every side.
pub fn full_meadow(id: u32, animals: impl IntoIterator<Item = AnimalKind>) -> Tile {
    all_sides(id, TileKind::Normal, TileSide::Meadow(meadow(id, 0, animals)))
}

pub fn shaman_meadow(id: u32) -> Tile {
    let m = meadow(id, 0, []).with_special_power(SpecialPower::Shaman);
    all_sides(id, TileKind::Normal, TileSide::Meadow(m))
}

pub fn menhir_tile(id: u32) -> Tile {
    all_sides(id, TileKind::Menhir, TileSide::Meadow(meadow(id, 0, [])))
}

/// A single forest covering every side.
pub fn all_forest(id: u32) -> Tile {
    all_sides(id, TileKind::Normal, TileSide::Forest(forest(id, ForestKind::Plain)))
}

/// Forest running north-south between two meadows.
pub fn forest_corridor(id: u32, kind: ForestKind) -> Tile {
    let f = forest(id, kind);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::Forest(f.clone()),
        TileSide::Meadow(meadow(id, 0, [])),
        TileSide::Forest(f),
        TileSide::Meadow(meadow(id, 2, [])),
    )
}

/// Forest ending at the southern edge, meadow elsewhere.
pub fn forest_cap(id: u32, kind: ForestKind) -> Tile {
    let m = meadow(id, 0, []);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::Meadow(m.clone()),
        TileSide::Meadow(m.clone()),
        TileSide::Forest(forest(id, kind)),
        TileSide::Meadow(m),
    )
}

/// River entering from the north and leaving to the east.
pub fn river_bend(id: u32) -> Tile {
    let outer = meadow(id, 0, []);
    let inner = meadow(id, 2, []);
    let river = River::new(TileId::new(id).zone(1), 1);
    Tile::new(
        TileId::new(id),
        TileKind::Normal,
        TileSide::River {
            meadow1: outer.clone(),
            river: river.clone(),
            meadow2: inner.clone(),
        },
        TileSide::River {
            meadow1: inner,
            river,
            meadow2: outer.clone(),
        },
        TileSide::Meadow(outer.clone()),
        TileSide::Meadow(outer),
    )
}

/// River entering from the north and ending in a lake.
pub fn lake_end(id: u32, lake_fish: u32) -> Tile {
    let m = meadow(id, 0, []);
    let lake = Lake::new(TileId::new(id).zone(8), lake_fish);
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
