//! Zones, tiles, placed tiles and decks.
//!
//! Everything here is an immutable value. Placement and occupation go
//! through `Board`, which keeps its partitions in sync with the tiles.

pub mod zone;
pub mod tile;
pub mod placed;
pub mod deck;

#[cfg(test)]
pub(crate) mod test_tiles;

pub use zone::{
    Animal, AnimalCounts, AnimalId, AnimalKind, Forest, ForestKind, Lake, Meadow, River,
    SpecialPower, TileId, Water, Zone, ZoneId, ZoneLike,
};
pub use tile::{Tile, TileKind, TileSide};
pub use placed::{Occupant, OccupantKind, PlacedTile};
pub use deck::TileDecks;
