//! Occupants and tiles placed on the board.

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileKind, TileSide};
use super::zone::{Forest, Meadow, River, TileId, Zone, ZoneId, ZoneLike};
use crate::core::{Direction, PlayerColor, Pos, Rotation};
use crate::error::{RulesError, RulesResult};

/// Kind of piece a player puts on a zone.
///
/// The discriminant is the value used by the action codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OccupantKind {
    Pawn = 0,
    Hut = 1,
}

/// A piece sitting on a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occupant {
    pub kind: OccupantKind,
    pub zone_id: ZoneId,
}

impl Occupant {
    #[must_use]
    pub const fn new(kind: OccupantKind, zone_id: ZoneId) -> Self {
        Self { kind, zone_id }
    }

    #[must_use]
    pub const fn pawn(zone_id: ZoneId) -> Self {
        Self::new(OccupantKind::Pawn, zone_id)
    }

    #[must_use]
    pub const fn hut(zone_id: ZoneId) -> Self {
        Self::new(OccupantKind::Hut, zone_id)
    }
}

/// A tile on the board.
///
/// The start tile has no placer and can never be occupied.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    pub placer: Option<PlayerColor>,
    pub rotation: Rotation,
    pub pos: Pos,
    pub occupant: Option<Occupant>,
}

impl PlacedTile {
    /// Place a tile, unoccupied.
    #[must_use]
    pub fn new(tile: Tile, placer: Option<PlayerColor>, rotation: Rotation, pos: Pos) -> Self {
        Self {
            tile,
            placer,
            rotation,
            pos,
            occupant: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.tile.id
    }

    #[must_use]
    pub fn kind(&self) -> TileKind {
        self.tile.kind
    }

    /// The side showing in the given absolute direction.
    #[must_use]
    pub fn side(&self, direction: Direction) -> &TileSide {
        self.tile.side(direction.rotated(self.rotation.negated()))
    }

    pub fn zone_with_id(&self, id: ZoneId) -> RulesResult<Zone> {
        self.tile
            .zones()
            .into_iter()
            .find(|zone| zone.id() == id)
            .ok_or(RulesError::ZoneNotOnTile(self.id(), id))
    }

    /// The zone carrying this tile's special power, if any.
    #[must_use]
    pub fn special_power_zone(&self) -> Option<Zone> {
        self.tile
            .zones()
            .into_iter()
            .find(|zone| zone.special_power().is_some())
    }

    /// Every occupant the rules allow on this tile, ignoring availability.
    ///
    /// Pawns go on side zones. Huts go on rivers that do not end in a lake,
    /// and on the lakes themselves.
    #[must_use]
    pub fn potential_occupants(&self) -> Vec<Occupant> {
        if self.placer.is_none() {
            return Vec::new();
        }
        let mut occupants = Vec::new();
        for zone in self.tile.side_zones() {
            occupants.push(Occupant::pawn(zone.id()));
            if let Zone::River(river) = &zone {
                let hut_zone = river.lake.as_ref().map_or(river.id, |lake| lake.id);
                let hut = Occupant::hut(hut_zone);
                if !occupants.contains(&hut) {
                    occupants.push(hut);
                }
            }
        }
        occupants
    }

    pub fn forest_zones(&self) -> impl Iterator<Item = Forest> {
        self.tile.zones().into_iter().filter_map(|zone| match zone {
            Zone::Forest(forest) => Some(forest),
            _ => None,
        })
    }

    pub fn meadow_zones(&self) -> impl Iterator<Item = Meadow> {
        self.tile.zones().into_iter().filter_map(|zone| match zone {
            Zone::Meadow(meadow) => Some(meadow),
            _ => None,
        })
    }

    pub fn river_zones(&self) -> impl Iterator<Item = River> {
        self.tile.zones().into_iter().filter_map(|zone| match zone {
            Zone::River(river) => Some(river),
            _ => None,
        })
    }

    /// Same tile carrying the given occupant.
    pub fn with_occupant(&self, occupant: Occupant) -> RulesResult<Self> {
        if self.occupant.is_some() {
            return Err(RulesError::TileOccupied(self.id()));
        }
        Ok(Self {
            occupant: Some(occupant),
            ..self.clone()
        })
    }

    #[must_use]
    pub fn with_no_occupant(&self) -> Self {
        Self {
            occupant: None,
            ..self.clone()
        }
    }

    /// Zone occupied by a piece of the given kind, if there is one.
    #[must_use]
    pub fn id_of_zone_occupied_by(&self, kind: OccupantKind) -> Option<ZoneId> {
        self.occupant
            .filter(|occupant| occupant.kind == kind)
            .map(|occupant| occupant.zone_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::test_tiles;

    #[test]
    fn test_side_follows_rotation() {
        let tile = test_tiles::river_bend(30);
        // Declared sides: N river, E river, S meadow, W meadow.
        let placed = PlacedTile::new(tile, Some(PlayerColor::Red), Rotation::Right, Pos::ORIGIN);
        assert!(matches!(placed.side(Direction::E), TileSide::River { .. }));
        assert!(matches!(placed.side(Direction::S), TileSide::River { .. }));
        assert!(matches!(placed.side(Direction::W), TileSide::Meadow(_)));
        assert!(matches!(placed.side(Direction::N), TileSide::Meadow(_)));
    }

    #[test]
    fn test_potential_occupants() {
        let tile = test_tiles::lake_end(40, 2);
        let placed = PlacedTile::new(tile.clone(), Some(PlayerColor::Blue), Rotation::None, Pos::ORIGIN);
        let occupants = placed.potential_occupants();

        assert!(occupants.contains(&Occupant::pawn(ZoneId::new(401))));
        assert!(occupants.contains(&Occupant::hut(ZoneId::new(408))));
        assert!(!occupants.contains(&Occupant::hut(ZoneId::new(401))));
        assert!(!occupants.contains(&Occupant::pawn(ZoneId::new(408))));

        let start = PlacedTile::new(tile, None, Rotation::None, Pos::ORIGIN);
        assert!(start.potential_occupants().is_empty());
    }

    #[test]
    fn test_occupant_lifecycle() {
        let tile = test_tiles::full_meadow(12, []);
        let placed = PlacedTile::new(tile, Some(PlayerColor::Red), Rotation::None, Pos::ORIGIN);
        let pawn = Occupant::pawn(ZoneId::new(120));

        let occupied = placed.with_occupant(pawn).unwrap();
        assert_eq!(occupied.id_of_zone_occupied_by(OccupantKind::Pawn), Some(ZoneId::new(120)));
        assert_eq!(occupied.id_of_zone_occupied_by(OccupantKind::Hut), None);
        assert_eq!(occupied.with_occupant(pawn), Err(RulesError::TileOccupied(TileId::new(12))));
        assert_eq!(occupied.with_no_occupant(), placed);
    }

    #[test]
    fn test_special_power_zone() {
        let placed = PlacedTile::new(
            test_tiles::shaman_meadow(50),
            Some(PlayerColor::Red),
            Rotation::None,
            Pos::ORIGIN,
        );
        assert_eq!(placed.special_power_zone().map(|z| z.id()), Some(ZoneId::new(500)));
        assert!(placed.zone_with_id(ZoneId::new(509)).is_err());
        assert_eq!(placed.meadow_zones().count(), 1);
        assert_eq!(placed.forest_zones().count(), 0);
    }
}
