//! The board: placed tiles on a bounded grid plus the areas they form.
//!
//! ## Layout
//!
//! Cells within `reach` of the origin map to a flat persistent vector,
//! row by row from the north-west corner. A separate vector records cell
//! indices in placement order, which gives the last placed tile.
//!
//! ## Consistency
//!
//! Every operation that changes tiles or occupants updates the four zone
//! partitions through a `ZonePartitionsBuilder` in the same step, and
//! returns a new board. On error the board it was called on is unchanged.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::areas::{Area, ZonePartitions, ZonePartitionsBuilder};
use crate::core::{Direction, PlayerColor, Pos, Rotation, RulesConfig, DEFAULT_REACH};
use crate::error::{RulesError, RulesResult};
use crate::tiles::{
    Animal, Forest, Meadow, Occupant, OccupantKind, PlacedTile, River, Tile, TileId, Water, ZoneId,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    reach: i32,
    tiles: Vector<Option<PlacedTile>>,
    placement_order: Vector<usize>,
    partitions: ZonePartitions,
    cancelled_animals: OrdSet<Animal>,
}

impl Default for Board {
    fn default() -> Self {
        Self::with_reach(DEFAULT_REACH)
    }
}

impl Board {
    /// An empty board of the standard size.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reach(reach: i32) -> Self {
        assert!(reach >= 1, "Board reach must be at least 1");
        let width = (2 * reach + 1) as usize;
        Self {
            reach,
            tiles: std::iter::repeat(None).take(width * width).collect(),
            placement_order: Vector::new(),
            partitions: ZonePartitions::default(),
            cancelled_animals: OrdSet::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::with_reach(config.reach)
    }

    #[must_use]
    pub fn reach(&self) -> i32 {
        self.reach
    }

    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x.abs() <= self.reach && pos.y.abs() <= self.reach
    }

    fn index_of(&self, pos: Pos) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let width = 2 * self.reach + 1;
        Some(((pos.y + self.reach) * width + pos.x + self.reach) as usize)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placement_order.is_empty()
    }

    #[must_use]
    pub fn tile_at(&self, pos: Pos) -> Option<&PlacedTile> {
        self.index_of(pos)
            .and_then(|index| self.tiles.get(index))
            .and_then(Option::as_ref)
    }

    /// Placed tiles, oldest first.
    pub fn placed_tiles(&self) -> impl Iterator<Item = &PlacedTile> + '_ {
        self.placement_order
            .iter()
            .filter_map(move |&index| self.tiles.get(index).and_then(Option::as_ref))
    }

    pub fn tile_with_id(&self, id: TileId) -> RulesResult<&PlacedTile> {
        self.placed_tiles()
            .find(|tile| tile.id() == id)
            .ok_or(RulesError::UnknownTile(id))
    }

    #[must_use]
    pub fn last_placed_tile(&self) -> Option<&PlacedTile> {
        self.placement_order
            .last()
            .and_then(|&index| self.tiles.get(index))
            .and_then(Option::as_ref)
    }

    #[must_use]
    pub fn partitions(&self) -> &ZonePartitions {
        &self.partitions
    }

    #[must_use]
    pub fn cancelled_animals(&self) -> &OrdSet<Animal> {
        &self.cancelled_animals
    }

    /// Every occupant on the board.
    #[must_use]
    pub fn occupants(&self) -> OrdSet<Occupant> {
        self.placed_tiles().filter_map(|tile| tile.occupant).collect()
    }

    /// Pieces of the given kind a player has on the board.
    #[must_use]
    pub fn occupant_count(&self, player: PlayerColor, kind: OccupantKind) -> u32 {
        self.placed_tiles()
            .filter(|tile| tile.placer == Some(player))
            .filter(|tile| tile.occupant.is_some_and(|o| o.kind == kind))
            .count() as u32
    }

    pub fn forest_area(&self, zone: ZoneId) -> RulesResult<&Area<Forest>> {
        self.partitions.forests.area_containing(zone)
    }

    pub fn meadow_area(&self, zone: ZoneId) -> RulesResult<&Area<Meadow>> {
        self.partitions.meadows.area_containing(zone)
    }

    pub fn river_area(&self, zone: ZoneId) -> RulesResult<&Area<River>> {
        self.partitions.rivers.area_containing(zone)
    }

    pub fn river_system_area(&self, zone: ZoneId) -> RulesResult<&Area<Water>> {
        self.partitions.river_systems.area_containing(zone)
    }

    pub fn meadow_areas(&self) -> impl Iterator<Item = &Area<Meadow>> + '_ {
        self.partitions.meadows.areas()
    }

    pub fn river_system_areas(&self) -> impl Iterator<Item = &Area<Water>> + '_ {
        self.partitions.river_systems.areas()
    }

    /// The part of a meadow within one cell of `pos`.
    ///
    /// The result keeps every occupant of the full meadow and has no open
    /// connections.
    pub fn adjacent_meadow(&self, pos: Pos, meadow: ZoneId) -> RulesResult<Area<Meadow>> {
        let area = self.meadow_area(meadow)?;
        let mut zones = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(tile) = self.tile_at(pos.translated(dx, dy)) {
                    zones.extend(tile.meadow_zones().filter(|m| area.contains(m)));
                }
            }
        }
        Ok(Area::new(zones, area.occupants().iter().copied(), 0))
    }

    /// Empty cells next to at least one placed tile.
    #[must_use]
    pub fn insertion_positions(&self) -> OrdSet<Pos> {
        self.placed_tiles()
            .flat_map(|tile| Direction::ALL.into_iter().map(move |d| tile.pos.neighbor(d)))
            .filter(|&pos| self.contains(pos) && self.tile_at(pos).is_none())
            .collect()
    }

    /// Whether the tile fits at its position: the cell is an insertion
    /// position and every neighbor shows a side of the same kind.
    #[must_use]
    pub fn can_add_tile(&self, tile: &PlacedTile) -> bool {
        if !self.insertion_positions().contains(&tile.pos) {
            return false;
        }
        Direction::ALL.into_iter().all(|d| {
            self.tile_at(tile.pos.neighbor(d))
                .map_or(true, |neighbor| neighbor.side(d.opposite()).is_same_kind_as(tile.side(d)))
        })
    }

    /// Whether the tile fits anywhere, in any rotation.
    #[must_use]
    pub fn could_place_tile(&self, tile: &Tile) -> bool {
        self.insertion_positions().into_iter().any(|pos| {
            Rotation::ALL.into_iter().any(|rotation| {
                self.can_add_tile(&PlacedTile::new(tile.clone(), None, rotation, pos))
            })
        })
    }

    /// Place a tile. Any tile may go anywhere on an empty board.
    pub fn with_new_tile(&self, tile: PlacedTile) -> RulesResult<Board> {
        let index = self.index_of(tile.pos).ok_or(RulesError::OutOfBoard(tile.pos))?;
        if !self.is_empty() && !self.can_add_tile(&tile) {
            return Err(RulesError::IllegalPlacement {
                tile: tile.id(),
                pos: tile.pos,
            });
        }

        let mut builder = ZonePartitionsBuilder::new(&self.partitions);
        builder.add_tile(&tile.tile)?;
        for direction in Direction::ALL {
            if let Some(neighbor) = self.tile_at(tile.pos.neighbor(direction)) {
                builder.connect_sides(tile.side(direction), neighbor.side(direction.opposite()))?;
            }
        }

        trace!(tile = %tile.id(), pos = %tile.pos, "tile placed");
        let mut next = self.clone();
        next.tiles.set(index, Some(tile));
        next.placement_order.push_back(index);
        next.partitions = builder.build();
        Ok(next)
    }

    fn with_tile_replaced(&self, tile: PlacedTile, partitions: ZonePartitions) -> RulesResult<Board> {
        let index = self.index_of(tile.pos).ok_or(RulesError::OutOfBoard(tile.pos))?;
        let mut next = self.clone();
        next.tiles.set(index, Some(tile));
        next.partitions = partitions;
        Ok(next)
    }

    /// Put an occupant on the tile owning its zone, on behalf of the tile's
    /// placer.
    pub fn with_occupant(&self, occupant: Occupant) -> RulesResult<Board> {
        let tile = self.tile_with_id(occupant.zone_id.tile_id())?;
        if tile.occupant.is_some() {
            return Err(RulesError::TileOccupied(tile.id()));
        }
        let placer = tile.placer.ok_or(RulesError::NoPlacer(tile.id()))?;
        let zone = tile.zone_with_id(occupant.zone_id)?;

        let mut builder = ZonePartitionsBuilder::new(&self.partitions);
        builder.add_initial_occupant(placer, occupant.kind, &zone)?;
        self.with_tile_replaced(tile.with_occupant(occupant)?, builder.build())
    }

    /// Take a pawn back to its owner.
    pub fn without_occupant(&self, occupant: Occupant) -> RulesResult<Board> {
        let tile = self.tile_with_id(occupant.zone_id.tile_id())?;
        if tile.occupant != Some(occupant) {
            return Err(RulesError::OccupantMismatch(tile.id()));
        }
        if occupant.kind != OccupantKind::Pawn {
            return Err(RulesError::NotAPawn);
        }
        let placer = tile.placer.ok_or(RulesError::NoPlacer(tile.id()))?;
        let zone = tile.zone_with_id(occupant.zone_id)?;

        let mut builder = ZonePartitionsBuilder::new(&self.partitions);
        builder.remove_pawn(placer, &zone)?;
        self.with_tile_replaced(tile.with_no_occupant(), builder.build())
    }

    /// Distinct closed forests containing a zone of the last placed tile.
    #[must_use]
    pub fn forests_closed_by_last_tile(&self) -> Vec<Area<Forest>> {
        let mut closed: Vec<Area<Forest>> = Vec::new();
        if let Some(tile) = self.last_placed_tile() {
            for forest in tile.forest_zones() {
                if let Ok(area) = self.forest_area(forest.id) {
                    if area.is_closed() && !closed.contains(area) {
                        closed.push(area.clone());
                    }
                }
            }
        }
        closed
    }

    /// Distinct closed rivers containing a zone of the last placed tile.
    #[must_use]
    pub fn rivers_closed_by_last_tile(&self) -> Vec<Area<River>> {
        let mut closed: Vec<Area<River>> = Vec::new();
        if let Some(tile) = self.last_placed_tile() {
            for river in tile.river_zones() {
                if let Ok(area) = self.river_area(river.id) {
                    if area.is_closed() && !closed.contains(area) {
                        closed.push(area.clone());
                    }
                }
            }
        }
        closed
    }

    /// Return the pawns in the given forests and rivers to their owners.
    /// Huts are not affected.
    pub fn without_gatherers_or_fishers_in(
        &self,
        forests: &[Area<Forest>],
        rivers: &[Area<River>],
    ) -> RulesResult<Board> {
        let mut builder = ZonePartitionsBuilder::new(&self.partitions);
        for forest in forests {
            builder.clear_gatherers(forest)?;
        }
        for river in rivers {
            builder.clear_fishers(river)?;
        }

        let cleared = |zone: ZoneId| {
            forests.iter().any(|a| a.zones().iter().any(|f| f.id == zone))
                || rivers.iter().any(|a| a.zones().iter().any(|r| r.id == zone))
        };

        let mut next = self.clone();
        for &index in &self.placement_order {
            if let Some(tile) = self.tiles.get(index).and_then(Option::as_ref) {
                if tile.id_of_zone_occupied_by(OccupantKind::Pawn).is_some_and(&cleared) {
                    next.tiles.set(index, Some(tile.with_no_occupant()));
                }
            }
        }
        next.partitions = builder.build();
        Ok(next)
    }

    #[must_use]
    pub fn with_more_cancelled_animals(&self, animals: impl IntoIterator<Item = Animal>) -> Board {
        let mut next = self.clone();
        next.cancelled_animals.extend(animals);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerColor::{Blue, Red};
    use crate::tiles::test_tiles;
    use crate::tiles::{AnimalKind, ForestKind};

    fn start_board() -> Board {
        Board::empty()
            .with_new_tile(PlacedTile::new(test_tiles::start_tile(), None, Rotation::None, Pos::ORIGIN))
            .unwrap()
    }

    fn place(board: &Board, tile: Tile, placer: PlayerColor, rotation: Rotation, pos: Pos) -> Board {
        board
            .with_new_tile(PlacedTile::new(tile, Some(placer), rotation, pos))
            .unwrap()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::empty();
        assert!(board.is_empty());
        assert!(board.last_placed_tile().is_none());
        assert!(board.insertion_positions().is_empty());
        assert!(board.forests_closed_by_last_tile().is_empty());
        assert!(board.rivers_closed_by_last_tile().is_empty());
        assert_eq!(board.reach(), 12);
    }

    #[test]
    fn test_insertion_positions() {
        let board = start_board();
        let positions: Vec<_> = board.insertion_positions().into_iter().collect();
        assert_eq!(
            positions,
            vec![Pos::new(-1, 0), Pos::new(0, -1), Pos::new(0, 1), Pos::new(1, 0)]
        );
    }

    #[test]
    fn test_insertion_positions_stop_at_edge() {
        let board = Board::with_reach(1)
            .with_new_tile(PlacedTile::new(test_tiles::start_tile(), None, Rotation::None, Pos::new(1, 1)))
            .unwrap();
        let positions: Vec<_> = board.insertion_positions().into_iter().collect();
        assert_eq!(positions, vec![Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn test_side_kinds_must_match() {
        let board = start_board();
        // North of the start tile shows a forest.
        let meadow = PlacedTile::new(test_tiles::full_meadow(1, []), Some(Red), Rotation::None, Pos::new(0, -1));
        assert!(!board.can_add_tile(&meadow));
        let forest = PlacedTile::new(
            test_tiles::forest_cap(2, ForestKind::Plain),
            Some(Red),
            Rotation::None,
            Pos::new(0, -1),
        );
        assert!(board.can_add_tile(&forest));
        // Not adjacent to anything.
        let far = PlacedTile::new(test_tiles::full_meadow(3, []), Some(Red), Rotation::None, Pos::new(3, 3));
        assert!(!board.can_add_tile(&far));
        assert_eq!(
            board.with_new_tile(far),
            Err(RulesError::IllegalPlacement {
                tile: TileId::new(3),
                pos: Pos::new(3, 3)
            })
        );
    }

    #[test]
    fn test_out_of_board() {
        let tile = PlacedTile::new(test_tiles::start_tile(), None, Rotation::None, Pos::new(13, 0));
        assert_eq!(
            Board::empty().with_new_tile(tile),
            Err(RulesError::OutOfBoard(Pos::new(13, 0)))
        );
    }

    #[test]
    fn test_could_place_tile() {
        let board = start_board();
        assert!(board.could_place_tile(&test_tiles::full_meadow(1, [])));
        assert!(board.could_place_tile(&test_tiles::all_forest(2)));

        // Capping the start forest leaves no forest edge open.
        let board = place(&board, test_tiles::forest_cap(3, ForestKind::Plain), Red, Rotation::None, Pos::new(0, -1));
        assert!(!board.could_place_tile(&test_tiles::all_forest(4)));
    }

    #[test]
    fn test_forest_closed_by_last_tile() {
        let board = start_board();
        let board = place(&board, test_tiles::forest_cap(3, ForestKind::Plain), Red, Rotation::None, Pos::new(0, -1));

        let closed = board.forests_closed_by_last_tile();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].tile_ids().len(), 2);
        assert_eq!(board.last_placed_tile().map(PlacedTile::id), Some(TileId::new(3)));
    }

    #[test]
    fn test_occupants() {
        let board = start_board();
        let board = place(&board, test_tiles::full_meadow(1, []), Blue, Rotation::None, Pos::new(1, 0));
        let pawn = Occupant::pawn(ZoneId::new(10));

        let occupied = board.with_occupant(pawn).unwrap();
        assert_eq!(occupied.occupant_count(Blue, OccupantKind::Pawn), 1);
        assert_eq!(occupied.occupant_count(Red, OccupantKind::Pawn), 0);
        assert_eq!(occupied.occupants(), OrdSet::unit(pawn));
        assert_eq!(occupied.meadow_area(ZoneId::new(560)).unwrap().occupants(), &[Blue]);
        assert_eq!(occupied.with_occupant(pawn), Err(RulesError::TileOccupied(TileId::new(1))));

        let freed = occupied.without_occupant(pawn).unwrap();
        assert_eq!(freed.occupant_count(Blue, OccupantKind::Pawn), 0);
        assert!(!freed.meadow_area(ZoneId::new(560)).unwrap().is_occupied());
        assert_eq!(
            freed.without_occupant(pawn),
            Err(RulesError::OccupantMismatch(TileId::new(1)))
        );

        // The start tile has no placer.
        assert_eq!(
            board.with_occupant(Occupant::pawn(ZoneId::new(560))),
            Err(RulesError::NoPlacer(TileId::new(56)))
        );
    }

    #[test]
    fn test_huts_cannot_be_taken_back() {
        let board = start_board();
        let board = place(&board, test_tiles::lake_end(5, 1), Red, Rotation::HalfTurn, Pos::new(0, 1));
        let board = board.with_occupant(Occupant::hut(ZoneId::new(58))).unwrap();
        assert_eq!(board.occupant_count(Red, OccupantKind::Hut), 1);
        assert_eq!(board.without_occupant(Occupant::hut(ZoneId::new(58))), Err(RulesError::NotAPawn));
    }

    #[test]
    fn test_without_gatherers() {
        let board = start_board();
        let board = place(&board, test_tiles::forest_cap(3, ForestKind::Plain), Red, Rotation::None, Pos::new(0, -1));
        let board = board.with_occupant(Occupant::pawn(ZoneId::new(31))).unwrap();

        let closed = board.forests_closed_by_last_tile();
        let cleared = board.without_gatherers_or_fishers_in(&closed, &[]).unwrap();
        assert_eq!(cleared.occupant_count(Red, OccupantKind::Pawn), 0);
        assert!(!cleared.forest_area(ZoneId::new(31)).unwrap().is_occupied());
    }

    #[test]
    fn test_adjacent_meadow() {
        let mut board = start_board();
        for x in 1..=3 {
            board = place(&board, test_tiles::full_meadow(x, [AnimalKind::Deer]), Red, Rotation::None, Pos::new(x as i32, 0));
        }
        let board = board.with_occupant(Occupant::pawn(ZoneId::new(30))).unwrap();

        let adjacent = board.adjacent_meadow(Pos::new(1, 0), ZoneId::new(10)).unwrap();
        let tiles: Vec<_> = adjacent.tile_ids().into_iter().map(TileId::raw).collect();
        assert_eq!(tiles, vec![1, 2, 56]);
        assert_eq!(adjacent.occupants(), &[Red]);
        assert!(adjacent.is_closed());
        assert_eq!(adjacent.animals(&OrdSet::new()).len(), 2);
    }

    #[test]
    fn test_cancelled_animals() {
        let board = start_board();
        let deer = Animal::new(100, AnimalKind::Deer);
        let board = board.with_more_cancelled_animals([deer]);
        assert!(board.cancelled_animals().contains(&deer));
        let board = board.with_more_cancelled_animals([deer]);
        assert_eq!(board.cancelled_animals().len(), 1);
    }
}
