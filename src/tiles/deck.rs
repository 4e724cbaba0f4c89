//! The three tile decks.
//!
//! Decks are persistent vectors drawn from the front; drawing returns a new
//! `TileDecks` and leaves the original untouched.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::tile::{Tile, TileKind};
use crate::core::GameRng;
use crate::error::{RulesError, RulesResult};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDecks {
    start: Vector<Tile>,
    normal: Vector<Tile>,
    menhir: Vector<Tile>,
}

impl TileDecks {
    pub fn new(
        start: impl IntoIterator<Item = Tile>,
        normal: impl IntoIterator<Item = Tile>,
        menhir: impl IntoIterator<Item = Tile>,
    ) -> Self {
        Self {
            start: start.into_iter().collect(),
            normal: normal.into_iter().collect(),
            menhir: menhir.into_iter().collect(),
        }
    }

    /// Shuffle a tile catalog and sort it into decks by kind.
    ///
    /// Relative order inside each deck follows the shuffled catalog, so the
    /// same rng state always yields the same decks.
    pub fn shuffled(tiles: impl IntoIterator<Item = Tile>, rng: &mut GameRng) -> Self {
        let mut tiles: Vec<Tile> = tiles.into_iter().collect();
        rng.shuffle(&mut tiles);

        let mut decks = Self::default();
        for tile in tiles {
            match tile.kind {
                TileKind::Start => decks.start.push_back(tile),
                TileKind::Normal => decks.normal.push_back(tile),
                TileKind::Menhir => decks.menhir.push_back(tile),
            }
        }
        decks
    }

    fn deck(&self, kind: TileKind) -> &Vector<Tile> {
        match kind {
            TileKind::Start => &self.start,
            TileKind::Normal => &self.normal,
            TileKind::Menhir => &self.menhir,
        }
    }

    fn deck_mut(&mut self, kind: TileKind) -> &mut Vector<Tile> {
        match kind {
            TileKind::Start => &mut self.start,
            TileKind::Normal => &mut self.normal,
            TileKind::Menhir => &mut self.menhir,
        }
    }

    #[must_use]
    pub fn deck_size(&self, kind: TileKind) -> usize {
        self.deck(kind).len()
    }

    #[must_use]
    pub fn top_tile(&self, kind: TileKind) -> Option<&Tile> {
        self.deck(kind).front()
    }

    /// Decks without the top tile of the given kind.
    pub fn with_top_tile_drawn(&self, kind: TileKind) -> RulesResult<Self> {
        let mut next = self.clone();
        next.deck_mut(kind)
            .pop_front()
            .ok_or(RulesError::EmptyDeck(kind))?;
        Ok(next)
    }

    /// Discard tiles from the given deck until its top tile satisfies
    /// `keep`, or the deck is empty.
    #[must_use]
    pub fn with_top_tile_drawn_until(&self, kind: TileKind, mut keep: impl FnMut(&Tile) -> bool) -> Self {
        let mut next = self.clone();
        let deck = next.deck_mut(kind);
        while let Some(top) = deck.front() {
            if keep(top) {
                break;
            }
            trace!(tile = %top.id, ?kind, "discarding unplaceable tile");
            deck.pop_front();
        }
        next
    }
}
