//! Zones, animals and special powers.
//!
//! ## Identifiers
//!
//! Identifiers are hierarchical: a zone id is `tile_id * 10 + local_id` with
//! a local id in `0..=9`, and an animal id is `zone_id * 10 + n`. Owning
//! tiles and zones can therefore be recovered from any id by division.
//!
//! ## Zone kinds
//!
//! `Zone` is a closed sum over forests, meadows, rivers and lakes. Rivers and
//! lakes together form the `Water` sub-variant used by the river-system
//! partition. Each concrete kind implements `ZoneLike`, so areas and
//! partitions can be generic over the kind of zone they aggregate.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tile identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Id of the zone with the given local index on this tile.
    #[must_use]
    pub const fn zone(self, local_id: u8) -> ZoneId {
        ZoneId(self.0 * 10 + local_id as u32)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Zone identifier, `tile_id * 10 + local_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub u32);

impl ZoneId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn tile_id(self) -> TileId {
        TileId(self.0 / 10)
    }

    #[must_use]
    pub const fn local_id(self) -> u8 {
        (self.0 % 10) as u8
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

/// Animal identifier, `zone_id * 10 + n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnimalId(pub u32);

impl AnimalId {
    #[must_use]
    pub const fn zone_id(self) -> ZoneId {
        ZoneId(self.0 / 10)
    }

    #[must_use]
    pub const fn tile_id(self) -> TileId {
        TileId(self.0 / 100)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimalKind {
    Mammoth,
    Aurochs,
    Deer,
    Tiger,
}

/// An animal living in a meadow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub kind: AnimalKind,
}

impl Animal {
    #[must_use]
    pub const fn new(id: u32, kind: AnimalKind) -> Self {
        Self {
            id: AnimalId(id),
            kind,
        }
    }

    #[must_use]
    pub const fn tile_id(&self) -> TileId {
        self.id.tile_id()
    }
}

/// Animal counts per kind, as reported to the phrase generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimalCounts {
    pub mammoths: u32,
    pub aurochs: u32,
    pub deer: u32,
    pub tigers: u32,
}

impl AnimalCounts {
    /// Tally the given animals.
    pub fn tally<'a>(animals: impl IntoIterator<Item = &'a Animal>) -> Self {
        let mut counts = Self::default();
        for animal in animals {
            match animal.kind {
                AnimalKind::Mammoth => counts.mammoths += 1,
                AnimalKind::Aurochs => counts.aurochs += 1,
                AnimalKind::Deer => counts.deer += 1,
                AnimalKind::Tiger => counts.tigers += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rule exception carried by at most one zone per tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecialPower {
    /// Lets the placer take one of their pawns back.
    Shaman,
    /// Scores the placer for the lakes of its river system.
    Logboat,
    /// Scores the nearby animals of its meadow once, then removes them.
    HuntingTrap,
    /// Scores its meadow's nearby animals a second time at game end.
    PitTrap,
    /// Keeps tigers of its meadow from eating deer.
    WildFire,
    /// Adds a lake bonus to its river system at game end.
    Raft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForestKind {
    Plain,
    WithMenhir,
    WithMushrooms,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Forest {
    pub id: ZoneId,
    pub kind: ForestKind,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Meadow {
    pub id: ZoneId,
    pub animals: SmallVec<[Animal; 2]>,
    pub special_power: Option<SpecialPower>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lake {
    pub id: ZoneId,
    pub fish_count: u32,
    pub special_power: Option<SpecialPower>,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct River {
    pub id: ZoneId,
    pub fish_count: u32,
    pub lake: Option<Lake>,
}

impl Forest {
    #[must_use]
    pub fn new(id: ZoneId, kind: ForestKind) -> Self {
        Self { id, kind }
    }
}

impl Meadow {
    #[must_use]
    pub fn new(id: ZoneId, animals: impl IntoIterator<Item = Animal>) -> Self {
        Self {
            id,
            animals: animals.into_iter().collect(),
            special_power: None,
        }
    }

    #[must_use]
    pub fn with_special_power(mut self, power: SpecialPower) -> Self {
        self.special_power = Some(power);
        self
    }
}

impl Lake {
    #[must_use]
    pub fn new(id: ZoneId, fish_count: u32) -> Self {
        Self {
            id,
            fish_count,
            special_power: None,
        }
    }

    #[must_use]
    pub fn with_special_power(mut self, power: SpecialPower) -> Self {
        self.special_power = Some(power);
        self
    }
}

impl River {
    #[must_use]
    pub fn new(id: ZoneId, fish_count: u32) -> Self {
        Self {
            id,
            fish_count,
            lake: None,
        }
    }

    /// Attach the lake this river flows into.
    #[must_use]
    pub fn with_lake(mut self, lake: Lake) -> Self {
        self.lake = Some(lake);
        self
    }

    #[must_use]
    pub fn has_lake(&self) -> bool {
        self.lake.is_some()
    }
}

/// A river or a lake; the zones of the river-system partition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Water {
    River(River),
    Lake(Lake),
}

impl Water {
    #[must_use]
    pub fn fish_count(&self) -> u32 {
        match self {
            Water::River(river) => river.fish_count,
            Water::Lake(lake) => lake.fish_count,
        }
    }

    #[must_use]
    pub fn is_lake(&self) -> bool {
        matches!(self, Water::Lake(_))
    }
}

/// Any zone of a tile.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Forest(Forest),
    Meadow(Meadow),
    River(River),
    Lake(Lake),
}

/// Common view over every zone kind.
pub trait ZoneLike: Clone + Ord + std::fmt::Debug {
    fn id(&self) -> ZoneId;

    fn special_power(&self) -> Option<SpecialPower> {
        None
    }

    fn tile_id(&self) -> TileId {
        self.id().tile_id()
    }

    fn local_id(&self) -> u8 {
        self.id().local_id()
    }
}

impl ZoneLike for Forest {
    fn id(&self) -> ZoneId {
        self.id
    }
}

impl ZoneLike for Meadow {
    fn id(&self) -> ZoneId {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

impl ZoneLike for Lake {
    fn id(&self) -> ZoneId {
        self.id
    }

    fn special_power(&self) -> Option<SpecialPower> {
        self.special_power
    }
}

impl ZoneLike for River {
    fn id(&self) -> ZoneId {
        self.id
    }
}

impl ZoneLike for Water {
    fn id(&self) -> ZoneId {
        match self {
            Water::River(river) => river.id,
            Water::Lake(lake) => lake.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Water::River(_) => None,
            Water::Lake(lake) => lake.special_power,
        }
    }
}

impl ZoneLike for Zone {
    fn id(&self) -> ZoneId {
        match self {
            Zone::Forest(forest) => forest.id,
            Zone::Meadow(meadow) => meadow.id,
            Zone::River(river) => river.id,
            Zone::Lake(lake) => lake.id,
        }
    }

    fn special_power(&self) -> Option<SpecialPower> {
        match self {
            Zone::Forest(_) | Zone::River(_) => None,
            Zone::Meadow(meadow) => meadow.special_power,
            Zone::Lake(lake) => lake.special_power,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_hierarchy() {
        let zone = TileId::new(56).zone(3);
        assert_eq!(zone, ZoneId::new(563));
        assert_eq!(zone.tile_id(), TileId::new(56));
        assert_eq!(zone.local_id(), 3);

        let animal = Animal::new(5631, AnimalKind::Deer);
        assert_eq!(animal.id.zone_id(), zone);
        assert_eq!(animal.tile_id(), TileId::new(56));
    }

    #[test]
    fn test_special_powers() {
        let meadow = Meadow::new(ZoneId::new(10), []).with_special_power(SpecialPower::WildFire);
        let lake = Lake::new(ZoneId::new(18), 2).with_special_power(SpecialPower::Raft);
        let river = River::new(ZoneId::new(11), 1).with_lake(lake.clone());

        assert_eq!(Zone::Meadow(meadow).special_power(), Some(SpecialPower::WildFire));
        assert_eq!(Water::Lake(lake).special_power(), Some(SpecialPower::Raft));
        assert_eq!(Zone::River(river.clone()).special_power(), None);
        assert!(river.has_lake());
    }

    #[test]
    fn test_animal_tally() {
        let animals = [
            Animal::new(100, AnimalKind::Mammoth),
            Animal::new(101, AnimalKind::Deer),
            Animal::new(102, AnimalKind::Deer),
            Animal::new(103, AnimalKind::Tiger),
        ];
        let counts = AnimalCounts::tally(&animals);
        assert_eq!(counts.mammoths, 1);
        assert_eq!(counts.aurochs, 0);
        assert_eq!(counts.deer, 2);
        assert_eq!(counts.tigers, 1);
        assert!(AnimalCounts::tally(&[]).is_empty());
    }
}
