//! Point values.
//!
//! Each function takes the counts that matter for one scoring event and
//! panics if the event could not have happened with those counts (a closed
//! forest or river always spans at least two tiles, and logboat and raft
//! bonuses need a lake).

/// Closed forest: 2 per tile, 3 per mushroom group.
#[must_use]
pub fn for_closed_forest(tile_count: u32, mushroom_group_count: u32) -> u32 {
    assert!(tile_count > 1, "A closed forest spans at least 2 tiles");
    2 * tile_count + 3 * mushroom_group_count
}

/// Closed river: 1 per tile, 1 per fish.
#[must_use]
pub fn for_closed_river(tile_count: u32, fish_count: u32) -> u32 {
    assert!(tile_count > 1, "A closed river spans at least 2 tiles");
    tile_count + fish_count
}

#[must_use]
pub fn for_meadow(mammoth_count: u32, aurochs_count: u32, deer_count: u32) -> u32 {
    3 * mammoth_count + 2 * aurochs_count + deer_count
}

#[must_use]
pub fn for_river_system(fish_count: u32) -> u32 {
    fish_count
}

#[must_use]
pub fn for_logboat(lake_count: u32) -> u32 {
    assert!(lake_count > 0, "A logboat needs at least 1 lake");
    2 * lake_count
}

#[must_use]
pub fn for_raft(lake_count: u32) -> u32 {
    assert!(lake_count > 0, "A raft needs at least 1 lake");
    lake_count
}
