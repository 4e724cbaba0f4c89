//! The message board: an append-only ledger of scoring events.
//!
//! Every point a player earns goes through a message, so the ledger is
//! also the score sheet. Events that earn nothing leave no message, except
//! for the menhir notice and the final winners message, which carry zero
//! points.

use std::fmt;
use std::sync::Arc;

use im::{OrdSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phrases::PhraseGenerator;
use crate::areas::Area;
use crate::core::PlayerColor;
use crate::rules::points;
use crate::tiles::{Animal, AnimalCounts, Forest, Meadow, River, TileId, Water};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub points: u32,
    pub scorers: OrdSet<PlayerColor>,
    pub tile_ids: OrdSet<TileId>,
}

#[derive(Clone)]
pub struct MessageBoard {
    phrases: Arc<dyn PhraseGenerator>,
    messages: Vector<Message>,
}

impl fmt::Debug for MessageBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBoard")
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

/// Boards compare by their messages only.
impl PartialEq for MessageBoard {
    fn eq(&self, other: &Self) -> bool {
        self.messages == other.messages
    }
}

impl Eq for MessageBoard {}

impl MessageBoard {
    #[must_use]
    pub fn new(phrases: Arc<dyn PhraseGenerator>) -> Self {
        Self {
            phrases,
            messages: Vector::new(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &Vector<Message> {
        &self.messages
    }

    /// Points earned so far by every player who earned any.
    #[must_use]
    pub fn points(&self) -> FxHashMap<PlayerColor, u32> {
        let mut totals = FxHashMap::default();
        for message in self.messages.iter().filter(|m| m.points > 0) {
            for &scorer in &message.scorers {
                *totals.entry(scorer).or_default() += message.points;
            }
        }
        totals
    }

    fn with_message(
        &self,
        text: String,
        points: u32,
        scorers: OrdSet<PlayerColor>,
        tile_ids: OrdSet<TileId>,
    ) -> Self {
        debug!(points, scorers = ?scorers, %text, "message added");
        let mut next = self.clone();
        next.messages.push_back(Message {
            text,
            points,
            scorers,
            tile_ids,
        });
        next
    }

    /// Credit the majority gatherers of a closed forest.
    #[must_use]
    pub fn with_scored_forest(&self, forest: &Area<Forest>) -> Self {
        if !forest.is_occupied() {
            return self.clone();
        }
        let scorers = forest.majority_occupants();
        let tile_ids = forest.tile_ids();
        let tile_count = tile_ids.len() as u32;
        let mushrooms = forest.mushroom_group_count();
        let points = points::for_closed_forest(tile_count, mushrooms);
        let text = self
            .phrases
            .players_scored_forest(&scorers, points, mushrooms, tile_count);
        self.with_message(text, points, scorers, tile_ids)
    }

    /// Announce that a player earned a menhir tile by closing this forest.
    #[must_use]
    pub fn with_closed_forest_with_menhir(&self, player: PlayerColor, forest: &Area<Forest>) -> Self {
        let text = self.phrases.player_closed_forest_with_menhir(player);
        self.with_message(text, 0, OrdSet::new(), forest.tile_ids())
    }

    /// Credit the majority fishers of a closed river.
    #[must_use]
    pub fn with_scored_river(&self, river: &Area<River>) -> Self {
        if !river.is_occupied() {
            return self.clone();
        }
        let scorers = river.majority_occupants();
        let tile_ids = river.tile_ids();
        let tile_count = tile_ids.len() as u32;
        let fish = river.fish_count();
        let points = points::for_closed_river(tile_count, fish);
        let text = self
            .phrases
            .players_scored_river(&scorers, points, fish, tile_count);
        self.with_message(text, points, scorers, tile_ids)
    }

    /// Credit the placer of the hunting trap with the animals of the meadow
    /// around it that are not in `cancelled`.
    #[must_use]
    pub fn with_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        adjacent_meadow: &Area<Meadow>,
        cancelled: &OrdSet<Animal>,
    ) -> Self {
        let counts = AnimalCounts::tally(&adjacent_meadow.animals(cancelled));
        let points = points::for_meadow(counts.mammoths, counts.aurochs, counts.deer);
        if points == 0 {
            return self.clone();
        }
        let text = self.phrases.player_scored_hunting_trap(scorer, points, &counts);
        self.with_message(text, points, OrdSet::unit(scorer), adjacent_meadow.tile_ids())
    }

    /// Credit the placer of the logboat with the lakes of its river system.
    #[must_use]
    pub fn with_scored_logboat(&self, scorer: PlayerColor, river_system: &Area<Water>) -> Self {
        let lakes = river_system.lake_count();
        let points = points::for_logboat(lakes);
        let text = self.phrases.player_scored_logboat(scorer, points, lakes);
        self.with_message(text, points, OrdSet::unit(scorer), river_system.tile_ids())
    }

    #[must_use]
    pub fn with_scored_meadow(&self, meadow: &Area<Meadow>, cancelled: &OrdSet<Animal>) -> Self {
        if !meadow.is_occupied() {
            return self.clone();
        }
        let counts = AnimalCounts::tally(&meadow.animals(cancelled));
        let points = points::for_meadow(counts.mammoths, counts.aurochs, counts.deer);
        if points == 0 {
            return self.clone();
        }
        let scorers = meadow.majority_occupants();
        let text = self.phrases.players_scored_meadow(&scorers, points, &counts);
        self.with_message(text, points, scorers, meadow.tile_ids())
    }

    #[must_use]
    pub fn with_scored_river_system(&self, river_system: &Area<Water>) -> Self {
        let fish = river_system.fish_count();
        if !river_system.is_occupied() || fish == 0 {
            return self.clone();
        }
        let scorers = river_system.majority_occupants();
        let points = points::for_river_system(fish);
        let text = self.phrases.players_scored_river_system(&scorers, points, fish);
        self.with_message(text, points, scorers, river_system.tile_ids())
    }

    /// Credit the majority occupants of a pit trap's meadow with the
    /// animals around the trap.
    #[must_use]
    pub fn with_scored_pit_trap(
        &self,
        adjacent_meadow: &Area<Meadow>,
        cancelled: &OrdSet<Animal>,
    ) -> Self {
        if !adjacent_meadow.is_occupied() {
            return self.clone();
        }
        let counts = AnimalCounts::tally(&adjacent_meadow.animals(cancelled));
        let points = points::for_meadow(counts.mammoths, counts.aurochs, counts.deer);
        if points == 0 {
            return self.clone();
        }
        let scorers = adjacent_meadow.majority_occupants();
        let text = self.phrases.players_scored_pit_trap(&scorers, points, &counts);
        self.with_message(text, points, scorers, adjacent_meadow.tile_ids())
    }

    #[must_use]
    pub fn with_scored_raft(&self, river_system: &Area<Water>) -> Self {
        if !river_system.is_occupied() {
            return self.clone();
        }
        let scorers = river_system.majority_occupants();
        let lakes = river_system.lake_count();
        let points = points::for_raft(lakes);
        let text = self.phrases.players_scored_raft(&scorers, points, lakes);
        self.with_message(text, points, scorers, river_system.tile_ids())
    }

    /// Final message. It carries no points of its own.
    #[must_use]
    pub fn with_winners(&self, winners: &OrdSet<PlayerColor>, points: u32) -> Self {
        let text = self.phrases.players_won(winners, points);
        self.with_message(text, 0, OrdSet::new(), OrdSet::new())
    }
}
