//! The four partitions a board maintains in parallel.
//!
//! Forests, meadows and rivers each get their own partition. A fourth one,
//! the river systems, groups rivers together with the lakes they feed; huts
//! occupy those areas and score their fish at game end.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::area::Area;
use super::partition::{ZonePartition, ZonePartitionBuilder};
use crate::core::PlayerColor;
use crate::error::{RulesError, RulesResult};
use crate::tiles::{
    Forest, Meadow, OccupantKind, River, Tile, TileSide, Water, Zone, ZoneId, ZoneLike,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePartitions {
    pub forests: ZonePartition<Forest>,
    pub meadows: ZonePartition<Meadow>,
    pub rivers: ZonePartition<River>,
    pub river_systems: ZonePartition<Water>,
}

/// Staging copy of all four partitions.
///
/// Operations are atomic: on error none of the partitions change.
#[derive(Clone, Debug)]
pub struct ZonePartitionsBuilder {
    forests: ZonePartitionBuilder<Forest>,
    meadows: ZonePartitionBuilder<Meadow>,
    rivers: ZonePartitionBuilder<River>,
    river_systems: ZonePartitionBuilder<Water>,
}

impl ZonePartitionsBuilder {
    #[must_use]
    pub fn new(partitions: &ZonePartitions) -> Self {
        Self {
            forests: ZonePartitionBuilder::new(&partitions.forests),
            meadows: ZonePartitionBuilder::new(&partitions.meadows),
            rivers: ZonePartitionBuilder::new(&partitions.rivers),
            river_systems: ZonePartitionBuilder::new(&partitions.river_systems),
        }
    }

    /// Run `f` against a copy and keep the result only if it succeeds.
    fn transaction(&mut self, f: impl FnOnce(&mut Self) -> RulesResult<()>) -> RulesResult<()> {
        let mut staged = self.clone();
        f(&mut staged)?;
        *self = staged;
        Ok(())
    }

    /// Add every zone of a freshly placed tile as its own area.
    ///
    /// A zone starts with one open connection per side it touches. Lakes
    /// count one connection for every river side flowing into them, and
    /// each such river counts one more in the river-system partition; the
    /// river and its lake are then joined, which consumes both extras.
    pub fn add_tile(&mut self, tile: &Tile) -> RulesResult<()> {
        let mut open: FxHashMap<ZoneId, u32> = FxHashMap::default();
        for side in &tile.sides {
            for zone in side.zones() {
                *open.entry(zone.id()).or_default() += 1;
                if let Zone::River(River { lake: Some(lake), .. }) = &zone {
                    *open.entry(lake.id).or_default() += 1;
                }
            }
        }

        self.transaction(|b| {
            let mut river_lakes = Vec::new();
            for zone in tile.zones() {
                let count = open.get(&zone.id()).copied().unwrap_or(0);
                match zone {
                    Zone::Forest(forest) => b.forests.add_singleton(forest, count)?,
                    Zone::Meadow(meadow) => b.meadows.add_singleton(meadow, count)?,
                    Zone::River(river) => {
                        let extra = match &river.lake {
                            Some(lake) => {
                                river_lakes.push((river.id, lake.id));
                                1
                            }
                            None => 0,
                        };
                        b.rivers.add_singleton(river.clone(), count)?;
                        b.river_systems.add_singleton(Water::River(river), count + extra)?;
                    }
                    Zone::Lake(lake) => b.river_systems.add_singleton(Water::Lake(lake), count)?,
                }
            }
            for (river, lake) in river_lakes {
                b.river_systems.union(river, lake)?;
            }
            Ok(())
        })
    }

    /// Join the areas on both sides of a matched edge.
    ///
    /// A river edge joins the rivers in both water partitions and crosses
    /// the flanking meadows: the first meadow of one side faces the second
    /// meadow of the other.
    pub fn connect_sides(&mut self, side: &TileSide, other: &TileSide) -> RulesResult<()> {
        match (side, other) {
            (TileSide::Forest(a), TileSide::Forest(b)) => self.forests.union(a.id, b.id),
            (TileSide::Meadow(a), TileSide::Meadow(b)) => self.meadows.union(a.id, b.id),
            (
                TileSide::River {
                    meadow1: a1,
                    river: ra,
                    meadow2: a2,
                },
                TileSide::River {
                    meadow1: b1,
                    river: rb,
                    meadow2: b2,
                },
            ) => self.transaction(|b| {
                b.meadows.union(a1.id, b2.id)?;
                b.meadows.union(a2.id, b1.id)?;
                b.rivers.union(ra.id, rb.id)?;
                b.river_systems.union(ra.id, rb.id)
            }),
            _ => Err(RulesError::SideKindMismatch),
        }
    }

    /// Put a player's first piece in the area containing `zone`.
    pub fn add_initial_occupant(
        &mut self,
        color: PlayerColor,
        kind: OccupantKind,
        zone: &Zone,
    ) -> RulesResult<()> {
        match (kind, zone) {
            (OccupantKind::Pawn, Zone::Forest(f)) => self.forests.add_initial_occupant(f.id, color),
            (OccupantKind::Pawn, Zone::Meadow(m)) => self.meadows.add_initial_occupant(m.id, color),
            (OccupantKind::Pawn, Zone::River(r)) => self.rivers.add_initial_occupant(r.id, color),
            (OccupantKind::Hut, Zone::River(_) | Zone::Lake(_)) => {
                self.river_systems.add_initial_occupant(zone.id(), color)
            }
            _ => Err(RulesError::OccupantKindMismatch {
                kind,
                zone: zone.id(),
            }),
        }
    }

    pub fn remove_pawn(&mut self, color: PlayerColor, zone: &Zone) -> RulesResult<()> {
        match zone {
            Zone::Forest(f) => self.forests.remove_occupant(f.id, color),
            Zone::Meadow(m) => self.meadows.remove_occupant(m.id, color),
            Zone::River(r) => self.rivers.remove_occupant(r.id, color),
            Zone::Lake(l) => Err(RulesError::OccupantKindMismatch {
                kind: OccupantKind::Pawn,
                zone: l.id,
            }),
        }
    }

    /// Send every gatherer in a forest back to its owner.
    pub fn clear_gatherers(&mut self, forest: &Area<Forest>) -> RulesResult<()> {
        self.forests.remove_all_occupants_of(forest)
    }

    /// Send every fisher in a river back to its owner. Huts stay.
    pub fn clear_fishers(&mut self, river: &Area<River>) -> RulesResult<()> {
        self.rivers.remove_all_occupants_of(river)
    }

    #[must_use]
    pub fn build(self) -> ZonePartitions {
        ZonePartitions {
            forests: self.forests.build(),
            meadows: self.meadows.build(),
            rivers: self.rivers.build(),
            river_systems: self.river_systems.build(),
        }
    }
}
