//! Areas: maximal groups of connected zones of one kind.
//!
//! ## Open connections
//!
//! An area counts the tile edges it exposes that no neighbor has matched
//! yet. Connecting two areas consumes one edge from each, so the merged
//! count is `a + b - 2`; an area connecting to itself (a ring) consumes two
//! of its own. The area is closed once the count reaches zero.
//!
//! ## Occupants
//!
//! Occupants are kept sorted by color with one entry per piece. A fresh
//! area accepts an occupant only while unoccupied; merging areas is how an
//! area ends up with several.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerColor;
use crate::error::{RulesError, RulesResult};
use crate::tiles::{Animal, Forest, ForestKind, Lake, Meadow, River, SpecialPower, TileId, Water, ZoneId, ZoneLike};

pub type Occupants = SmallVec<[PlayerColor; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area<Z: ZoneLike> {
    zones: OrdSet<Z>,
    occupants: Occupants,
    open_connections: u32,
}

impl<Z: ZoneLike> Area<Z> {
    pub fn new(
        zones: impl IntoIterator<Item = Z>,
        occupants: impl IntoIterator<Item = PlayerColor>,
        open_connections: u32,
    ) -> Self {
        let mut occupants: Occupants = occupants.into_iter().collect();
        occupants.sort_unstable();
        Self {
            zones: zones.into_iter().collect(),
            occupants,
            open_connections,
        }
    }

    #[must_use]
    pub fn zones(&self) -> &OrdSet<Z> {
        &self.zones
    }

    /// Occupant colors, sorted, one entry per piece.
    #[must_use]
    pub fn occupants(&self) -> &[PlayerColor] {
        &self.occupants
    }

    #[must_use]
    pub fn open_connections(&self) -> u32 {
        self.open_connections
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.open_connections == 0
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.occupants.is_empty()
    }

    #[must_use]
    pub fn contains(&self, zone: &Z) -> bool {
        self.zones.contains(zone)
    }

    /// Smallest zone id of the area; identifies it inside its partition.
    #[must_use]
    pub fn representative(&self) -> Option<ZoneId> {
        self.zones.iter().map(ZoneLike::id).min()
    }

    /// Colors holding the most pieces. Ties are all kept.
    ///
    /// ```
    /// use stoneage_tiles::areas::Area;
    /// use stoneage_tiles::core::PlayerColor::{Blue, Green, Red};
    /// use stoneage_tiles::tiles::{Forest, ForestKind, ZoneId};
    ///
    /// let forest = Forest::new(ZoneId::new(11), ForestKind::Plain);
    /// let area = Area::new([forest], [Red, Blue, Green, Blue, Red], 0);
    /// let majority: Vec<_> = area.majority_occupants().into_iter().collect();
    /// assert_eq!(majority, vec![Red, Blue]);
    /// ```
    #[must_use]
    pub fn majority_occupants(&self) -> OrdSet<PlayerColor> {
        let mut counts = [0u32; PlayerColor::ALL.len()];
        for color in &self.occupants {
            counts[color.index()] += 1;
        }
        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return OrdSet::new();
        }
        PlayerColor::ALL
            .into_iter()
            .filter(|color| counts[color.index()] == max)
            .collect()
    }

    /// Merge with a distinct area across one matched edge.
    pub fn connect_to(&self, other: &Area<Z>) -> RulesResult<Area<Z>> {
        let open = (self.open_connections + other.open_connections)
            .checked_sub(2)
            .ok_or(RulesError::NegativeOpenConnections)?;
        Ok(Area::new(
            self.zones.clone().union(other.zones.clone()),
            self.occupants.iter().chain(other.occupants.iter()).copied(),
            open,
        ))
    }

    /// Match one of this area's edges against another of its own.
    pub fn closed_on_itself(&self) -> RulesResult<Area<Z>> {
        let open = self
            .open_connections
            .checked_sub(2)
            .ok_or(RulesError::NegativeOpenConnections)?;
        Ok(Area {
            open_connections: open,
            ..self.clone()
        })
    }

    pub fn with_initial_occupant(&self, color: PlayerColor) -> RulesResult<Area<Z>> {
        if self.is_occupied() {
            return Err(RulesError::AreaOccupied);
        }
        Ok(Area {
            occupants: smallvec::smallvec![color],
            ..self.clone()
        })
    }

    /// Remove one piece of the given color.
    pub fn without_occupant(&self, color: PlayerColor) -> RulesResult<Area<Z>> {
        let index = self
            .occupants
            .iter()
            .position(|c| *c == color)
            .ok_or(RulesError::MissingOccupant(color))?;
        let mut next = self.clone();
        next.occupants.remove(index);
        Ok(next)
    }

    #[must_use]
    pub fn without_occupants(&self) -> Area<Z> {
        Area {
            occupants: Occupants::new(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn tile_ids(&self) -> OrdSet<TileId> {
        self.zones.iter().map(ZoneLike::tile_id).collect()
    }

    #[must_use]
    pub fn zone_with_special_power(&self, power: SpecialPower) -> Option<&Z> {
        self.zones.iter().find(|zone| zone.special_power() == Some(power))
    }
}

impl Area<Forest> {
    #[must_use]
    pub fn has_menhir(&self) -> bool {
        self.zones.iter().any(|f| f.kind == ForestKind::WithMenhir)
    }

    #[must_use]
    pub fn mushroom_group_count(&self) -> u32 {
        self.zones
            .iter()
            .filter(|f| f.kind == ForestKind::WithMushrooms)
            .count() as u32
    }
}

impl Area<Meadow> {
    /// Animals of the area that are not cancelled.
    #[must_use]
    pub fn animals(&self, cancelled: &OrdSet<Animal>) -> OrdSet<Animal> {
        self.zones
            .iter()
            .flat_map(|meadow| meadow.animals.iter().copied())
            .filter(|animal| !cancelled.contains(animal))
            .collect()
    }
}

impl Area<River> {
    /// Fish in the rivers plus each lake they end in, counted once.
    #[must_use]
    pub fn fish_count(&self) -> u32 {
        let lakes: OrdSet<Lake> = self.zones.iter().filter_map(|r| r.lake.clone()).collect();
        let river_fish: u32 = self.zones.iter().map(|r| r.fish_count).sum();
        river_fish + lakes.iter().map(|l| l.fish_count).sum::<u32>()
    }
}

impl Area<Water> {
    #[must_use]
    pub fn fish_count(&self) -> u32 {
        self.zones.iter().map(Water::fish_count).sum()
    }

    #[must_use]
    pub fn lake_count(&self) -> u32 {
        self.zones.iter().filter(|w| w.is_lake()).count() as u32
    }
}
