//! Disjoint areas covering every zone of one kind.
//!
//! ## Representation
//!
//! Each area is stored once, keyed by its representative: the smallest zone
//! id it contains. A second map points every zone at its representative,
//! so `area_containing` is two ordered-map lookups. Union relabels the
//! zones of the absorbed area. Both maps are persistent, so snapshots stay
//! O(1) to clone.
//!
//! ## Builder
//!
//! `ZonePartitionBuilder` owns a copy of a partition and mutates it in
//! place. Every operation validates before touching anything, so a failed
//! call leaves the builder as it was.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::area::Area;
use crate::core::PlayerColor;
use crate::error::{RulesError, RulesResult};
use crate::tiles::{ZoneId, ZoneLike};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePartition<Z: ZoneLike> {
    areas: OrdMap<ZoneId, Area<Z>>,
    owners: OrdMap<ZoneId, ZoneId>,
}

impl<Z: ZoneLike> Default for ZonePartition<Z> {
    fn default() -> Self {
        Self {
            areas: OrdMap::new(),
            owners: OrdMap::new(),
        }
    }
}

impl<Z: ZoneLike> ZonePartition<Z> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Areas in representative order.
    pub fn areas(&self) -> impl Iterator<Item = &Area<Z>> + '_ {
        self.areas.values()
    }

    #[must_use]
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    #[must_use]
    pub fn zone_count(&self) -> usize {
        self.owners.len()
    }

    pub fn area_containing(&self, zone: ZoneId) -> RulesResult<&Area<Z>> {
        let representative = self.owners.get(&zone).ok_or(RulesError::UnknownZone(zone))?;
        self.areas
            .get(representative)
            .ok_or(RulesError::UnknownZone(zone))
    }

    fn representative(&self, zone: ZoneId) -> RulesResult<ZoneId> {
        self.owners.get(&zone).copied().ok_or(RulesError::UnknownZone(zone))
    }
}

/// Mutable staging copy of a partition.
#[derive(Clone, Debug)]
pub struct ZonePartitionBuilder<Z: ZoneLike> {
    partition: ZonePartition<Z>,
}

impl<Z: ZoneLike> ZonePartitionBuilder<Z> {
    #[must_use]
    pub fn new(partition: &ZonePartition<Z>) -> Self {
        Self {
            partition: partition.clone(),
        }
    }

    /// Add a zone as an unoccupied area of its own.
    pub fn add_singleton(&mut self, zone: Z, open_connections: u32) -> RulesResult<()> {
        let id = zone.id();
        if self.partition.owners.contains_key(&id) {
            return Err(RulesError::DuplicateZone(id));
        }
        self.partition.owners.insert(id, id);
        self.partition
            .areas
            .insert(id, Area::new([zone], [], open_connections));
        Ok(())
    }

    /// Connect the areas containing the two zones.
    pub fn union(&mut self, zone_a: ZoneId, zone_b: ZoneId) -> RulesResult<()> {
        let rep_a = self.partition.representative(zone_a)?;
        let rep_b = self.partition.representative(zone_b)?;

        let area_a = self.partition.area_containing(zone_a)?;

        if rep_a == rep_b {
            let closed = area_a.closed_on_itself()?;
            self.partition.areas.insert(rep_a, closed);
            return Ok(());
        }

        let merged = area_a.connect_to(self.partition.area_containing(zone_b)?)?;
        let (kept, absorbed) = if rep_a < rep_b { (rep_a, rep_b) } else { (rep_b, rep_a) };

        if let Some(old) = self.partition.areas.remove(&absorbed) {
            for zone in old.zones() {
                self.partition.owners.insert(zone.id(), kept);
            }
        }
        self.partition.areas.insert(kept, merged);
        Ok(())
    }

    pub fn add_initial_occupant(&mut self, zone: ZoneId, color: PlayerColor) -> RulesResult<()> {
        let rep = self.partition.representative(zone)?;
        let occupied = self.partition.area_containing(zone)?.with_initial_occupant(color)?;
        self.partition.areas.insert(rep, occupied);
        Ok(())
    }

    pub fn remove_occupant(&mut self, zone: ZoneId, color: PlayerColor) -> RulesResult<()> {
        let rep = self.partition.representative(zone)?;
        let vacated = self.partition.area_containing(zone)?.without_occupant(color)?;
        self.partition.areas.insert(rep, vacated);
        Ok(())
    }

    /// Remove every occupant of an area, which must be in the partition
    /// exactly as given.
    pub fn remove_all_occupants_of(&mut self, area: &Area<Z>) -> RulesResult<()> {
        let rep = area.representative().ok_or(RulesError::UnknownArea)?;
        match self.partition.areas.get(&rep) {
            Some(current) if current == area => {
                let cleared = current.without_occupants();
                self.partition.areas.insert(rep, cleared);
                Ok(())
            }
            _ => Err(RulesError::UnknownArea),
        }
    }

    #[must_use]
    pub fn build(self) -> ZonePartition<Z> {
        self.partition
    }
}
