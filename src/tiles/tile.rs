//! Tiles and tile sides.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::zone::{Forest, Meadow, River, TileId, Zone, ZoneLike};
use crate::core::Direction;

/// Which deck a tile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Start,
    Normal,
    Menhir,
}

/// One edge of a tile.
///
/// A river side is flanked by two meadows, listed clockwise.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileSide {
    Forest(Forest),
    Meadow(Meadow),
    River {
        meadow1: Meadow,
        river: River,
        meadow2: Meadow,
    },
}

impl TileSide {
    /// Zones touching this side, clockwise.
    #[must_use]
    pub fn zones(&self) -> SmallVec<[Zone; 3]> {
        match self {
            TileSide::Forest(forest) => smallvec![Zone::Forest(forest.clone())],
            TileSide::Meadow(meadow) => smallvec![Zone::Meadow(meadow.clone())],
            TileSide::River {
                meadow1,
                river,
                meadow2,
            } => smallvec![
                Zone::Meadow(meadow1.clone()),
                Zone::River(river.clone()),
                Zone::Meadow(meadow2.clone()),
            ],
        }
    }

    /// Two sides can touch only if they are of the same kind.
    #[must_use]
    pub fn is_same_kind_as(&self, other: &TileSide) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A tile as printed, before placement.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    /// Sides in `Direction::ALL` order.
    pub sides: [TileSide; 4],
}

impl Tile {
    #[must_use]
    pub fn new(id: TileId, kind: TileKind, n: TileSide, e: TileSide, s: TileSide, w: TileSide) -> Self {
        Self {
            id,
            kind,
            sides: [n, e, s, w],
        }
    }

    /// The side declared for the given direction, ignoring any rotation.
    #[must_use]
    pub fn side(&self, direction: Direction) -> &TileSide {
        &self.sides[direction.index()]
    }

    /// Distinct zones touching at least one side, in first-seen order.
    #[must_use]
    pub fn side_zones(&self) -> Vec<Zone> {
        let mut zones: Vec<Zone> = Vec::new();
        for zone in self.sides.iter().flat_map(TileSide::zones) {
            if !zones.iter().any(|z| z.id() == zone.id()) {
                zones.push(zone);
            }
        }
        zones
    }

    /// Side zones plus the lakes rivers flow into.
    #[must_use]
    pub fn zones(&self) -> Vec<Zone> {
        let mut zones = Vec::new();
        for zone in self.side_zones() {
            let lake = match &zone {
                Zone::River(river) => river.lake.clone(),
                _ => None,
            };
            zones.push(zone);
            if let Some(lake) = lake {
                if !zones.iter().any(|z| z.id() == lake.id) {
                    zones.push(Zone::Lake(lake));
                }
            }
        }
        zones
    }
}
