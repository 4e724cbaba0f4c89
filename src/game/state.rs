//! The turn state machine.
//!
//! ## Turn structure
//!
//! A game starts in `StartGame`. Placing the start tile moves it to
//! `PlaceTile`; from there each turn places one tile, may take a pawn back
//! (shaman tiles only), may occupy one zone of the new tile, then finishes:
//! closed forests and rivers score, their pawns go home, and the next tile
//! is drawn. A player who closes a menhir forest with a normal tile plays
//! again with a menhir tile. The game ends when no tile can be drawn.
//!
//! ## Snapshots
//!
//! `GameState` is an immutable value. Every transition checks the expected
//! action first and returns a new state; on error the state it was called
//! on is unchanged.

use std::sync::Arc;

use im::{OrdSet, Vector};
use tracing::debug;

use super::messages::MessageBoard;
use super::phrases::PhraseGenerator;
use crate::areas::Area;
use crate::board::Board;
use crate::core::{PlayerColor, Pos, Rotation, RulesConfig};
use crate::error::{RulesError, RulesResult};
use crate::rules::GameResult;
use crate::tiles::{
    Animal, AnimalKind, Meadow, Occupant, OccupantKind, PlacedTile, SpecialPower, Tile, TileDecks,
    TileKind, Zone, ZoneLike,
};

/// What the current player has to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum NextAction {
    StartGame,
    PlaceTile,
    RetakePawn,
    OccupyTile,
    EndGame,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Player order, current player first.
    players: Vector<PlayerColor>,
    config: RulesConfig,
    decks: TileDecks,
    tile_to_place: Option<Tile>,
    board: Board,
    next_action: NextAction,
    messages: MessageBoard,
}

/// Deer eaten by `tigers` tigers, taken in the order given.
fn deer_eaten(deer: impl IntoIterator<Item = Animal>, tigers: usize) -> Vec<Animal> {
    deer.into_iter()
        .filter(|animal| animal.kind == AnimalKind::Deer)
        .take(tigers)
        .collect()
}

fn tiger_count(animals: &OrdSet<Animal>) -> usize {
    animals.iter().filter(|a| a.kind == AnimalKind::Tiger).count()
}

impl GameState {
    /// A game about to start, with the standard rules.
    pub fn initial(
        players: impl IntoIterator<Item = PlayerColor>,
        decks: TileDecks,
        phrases: Arc<dyn PhraseGenerator>,
    ) -> Self {
        Self::initial_with_config(players, decks, phrases, RulesConfig::default())
    }

    pub fn initial_with_config(
        players: impl IntoIterator<Item = PlayerColor>,
        decks: TileDecks,
        phrases: Arc<dyn PhraseGenerator>,
        config: RulesConfig,
    ) -> Self {
        let players: Vector<PlayerColor> = players.into_iter().collect();
        assert!(players.len() >= 2, "A game needs at least 2 players");
        let distinct: OrdSet<PlayerColor> = players.iter().copied().collect();
        assert_eq!(distinct.len(), players.len(), "Players must be distinct");

        Self {
            players,
            config,
            decks,
            tile_to_place: None,
            board: Board::from_config(&config),
            next_action: NextAction::StartGame,
            messages: MessageBoard::new(phrases),
        }
    }

    #[must_use]
    pub fn players(&self) -> &Vector<PlayerColor> {
        &self.players
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn tile_decks(&self) -> &TileDecks {
        &self.decks
    }

    #[must_use]
    pub fn tile_to_place(&self) -> Option<&Tile> {
        self.tile_to_place.as_ref()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn next_action(&self) -> NextAction {
        self.next_action
    }

    #[must_use]
    pub fn message_board(&self) -> &MessageBoard {
        &self.messages
    }

    /// The player whose turn it is; none before the start or after the end.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerColor> {
        match self.next_action {
            NextAction::StartGame | NextAction::EndGame => None,
            _ => self.players.front().copied(),
        }
    }

    /// Pieces of a kind the player still holds.
    #[must_use]
    pub fn free_occupants_count(&self, player: PlayerColor, kind: OccupantKind) -> u32 {
        u32::from(self.config.occupants_per_player(kind))
            .saturating_sub(self.board.occupant_count(player, kind))
    }

    /// Occupants the placer of the last tile could put on it now: the zone's
    /// area is free and the placer still holds a piece of that kind.
    pub fn last_tile_potential_occupants(&self) -> RulesResult<OrdSet<Occupant>> {
        let tile = self.board.last_placed_tile().ok_or(RulesError::EmptyBoard)?;
        let Some(placer) = tile.placer else {
            return Ok(OrdSet::new());
        };

        let mut occupants = OrdSet::new();
        for occupant in tile.potential_occupants() {
            if self.free_occupants_count(placer, occupant.kind) == 0 {
                continue;
            }
            let zone = tile.zone_with_id(occupant.zone_id)?;
            let taken = match (occupant.kind, &zone) {
                (OccupantKind::Pawn, Zone::Forest(f)) => self.board.forest_area(f.id)?.is_occupied(),
                (OccupantKind::Pawn, Zone::Meadow(m)) => self.board.meadow_area(m.id)?.is_occupied(),
                (OccupantKind::Pawn, Zone::River(r)) => self.board.river_area(r.id)?.is_occupied(),
                (OccupantKind::Pawn, Zone::Lake(_)) => true,
                (OccupantKind::Hut, _) => self.board.river_system_area(zone.id())?.is_occupied(),
            };
            if !taken {
                occupants.insert(occupant);
            }
        }
        Ok(occupants)
    }

    /// Every legal placement of the tile to place, by position then rotation.
    #[must_use]
    pub fn legal_placements(&self) -> Vec<PlacedTile> {
        let (Some(tile), Some(player)) = (&self.tile_to_place, self.current_player()) else {
            return Vec::new();
        };
        if self.next_action != NextAction::PlaceTile {
            return Vec::new();
        }
        self.board
            .insertion_positions()
            .into_iter()
            .flat_map(|pos| {
                Rotation::ALL
                    .into_iter()
                    .map(move |rotation| PlacedTile::new(tile.clone(), Some(player), rotation, pos))
            })
            .filter(|placed| self.board.can_add_tile(placed))
            .collect()
    }

    /// Pawns the current player may take back.
    #[must_use]
    pub fn retakable_pawns(&self) -> OrdSet<Occupant> {
        if self.next_action != NextAction::RetakePawn {
            return OrdSet::new();
        }
        let player = self.current_player();
        self.board
            .placed_tiles()
            .filter(|tile| tile.placer == player)
            .filter_map(|tile| tile.occupant)
            .filter(|occupant| occupant.kind == OccupantKind::Pawn)
            .collect()
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        (self.next_action == NextAction::EndGame)
            .then(|| GameResult::from_points(self.players.iter().copied(), &self.messages.points()))
    }

    fn expect_action(&self, expected: NextAction) -> RulesResult<()> {
        if self.next_action == expected {
            Ok(())
        } else {
            Err(RulesError::UnexpectedAction {
                expected,
                found: self.next_action,
            })
        }
    }

    /// Put the start tile at the origin and draw the first normal tile.
    ///
    /// With no normal tile to draw the game ends right away.
    pub fn with_starting_tile_placed(&self) -> RulesResult<Self> {
        self.expect_action(NextAction::StartGame)?;
        let start = self
            .decks
            .top_tile(TileKind::Start)
            .cloned()
            .ok_or(RulesError::EmptyDeck(TileKind::Start))?;

        let mut next = self.clone();
        next.board = self
            .board
            .with_new_tile(PlacedTile::new(start, None, Rotation::None, Pos::ORIGIN))?;
        next.decks = self.decks.with_top_tile_drawn(TileKind::Start)?;
        debug!(players = self.players.len(), "game started");

        match next.decks.top_tile(TileKind::Normal).cloned() {
            Some(first) => {
                next.decks = next.decks.with_top_tile_drawn(TileKind::Normal)?;
                next.tile_to_place = Some(first);
                next.next_action = NextAction::PlaceTile;
                Ok(next)
            }
            None => next.with_final_points_counted(),
        }
    }

    /// Place the tile to place on behalf of the current player.
    ///
    /// Logboat and hunting trap score right away. A shaman tile lets the
    /// player take a pawn back; otherwise the player may occupy the new
    /// tile if any of its zones can take one of their pieces.
    pub fn with_placed_tile(&self, tile: PlacedTile) -> RulesResult<Self> {
        self.expect_action(NextAction::PlaceTile)?;
        if tile.occupant.is_some() {
            return Err(RulesError::PreOccupiedTile);
        }
        let player = self.current_player().ok_or(RulesError::NotCurrentPlayer)?;
        if tile.placer != Some(player) {
            return Err(RulesError::NotCurrentPlayer);
        }
        if self.tile_to_place.as_ref() != Some(&tile.tile) {
            return Err(RulesError::WrongTile(tile.id()));
        }

        let mut board = self.board.with_new_tile(tile.clone())?;
        let mut messages = self.messages.clone();
        debug!(player = %player, tile = %tile.id(), pos = %tile.pos, "tile placed");

        let special = tile.special_power_zone();
        let power = special.as_ref().and_then(ZoneLike::special_power);
        match (power, &special) {
            (Some(SpecialPower::Logboat), Some(zone)) => {
                messages = messages.with_scored_logboat(player, board.river_system_area(zone.id())?);
            }
            (Some(SpecialPower::HuntingTrap), Some(zone)) => {
                let adjacent = board.adjacent_meadow(tile.pos, zone.id())?;
                let animals = adjacent.animals(board.cancelled_animals());
                let eaten = deer_eaten(animals.iter().copied(), tiger_count(&animals));
                let cancelled = board.cancelled_animals().clone().union(eaten.into_iter().collect());
                messages = messages.with_scored_hunting_trap(player, &adjacent, &cancelled);
                board = board.with_more_cancelled_animals(adjacent.animals(&OrdSet::new()));
            }
            _ => {}
        }

        let retake = power == Some(SpecialPower::Shaman)
            && board.occupant_count(player, OccupantKind::Pawn) > 0;
        let next = Self {
            tile_to_place: None,
            board,
            next_action: if retake {
                NextAction::RetakePawn
            } else {
                NextAction::OccupyTile
            },
            messages,
            ..self.clone()
        };
        if retake || !next.last_tile_potential_occupants()?.is_empty() {
            return Ok(next);
        }
        next.with_turn_finished()
    }

    /// Take one of the current player's pawns back, or decline with `None`.
    pub fn with_occupant_removed(&self, occupant: Option<Occupant>) -> RulesResult<Self> {
        self.expect_action(NextAction::RetakePawn)?;
        let mut board = self.board.clone();
        if let Some(occupant) = occupant {
            if occupant.kind != OccupantKind::Pawn {
                return Err(RulesError::NotAPawn);
            }
            let owner = board.tile_with_id(occupant.zone_id.tile_id())?.placer;
            if owner != self.current_player() {
                return Err(RulesError::NotCurrentPlayer);
            }
            board = board.without_occupant(occupant)?;
            debug!(zone = %occupant.zone_id, "pawn taken back");
        }

        let next = Self {
            board,
            next_action: NextAction::OccupyTile,
            ..self.clone()
        };
        if next.last_tile_potential_occupants()?.is_empty() {
            return next.with_turn_finished();
        }
        Ok(next)
    }

    /// Occupy a zone of the last placed tile, or decline with `None`.
    pub fn with_new_occupant(&self, occupant: Option<Occupant>) -> RulesResult<Self> {
        self.expect_action(NextAction::OccupyTile)?;
        let mut next = self.clone();
        if let Some(occupant) = occupant {
            if !self.last_tile_potential_occupants()?.contains(&occupant) {
                return Err(RulesError::NotAPotentialOccupant);
            }
            next.board = self.board.with_occupant(occupant)?;
            debug!(kind = ?occupant.kind, zone = %occupant.zone_id, "occupant placed");
        }
        next.with_turn_finished()
    }

    fn with_turn_finished(mut self) -> RulesResult<Self> {
        let player = self.current_player().ok_or(RulesError::NotCurrentPlayer)?;
        let forests = self.board.forests_closed_by_last_tile();
        let rivers = self.board.rivers_closed_by_last_tile();
        for forest in &forests {
            self.messages = self.messages.with_scored_forest(forest);
        }
        for river in &rivers {
            self.messages = self.messages.with_scored_river(river);
        }
        self.board = self.board.without_gatherers_or_fishers_in(&forests, &rivers)?;

        let closed_by_normal = self.board.last_placed_tile().map(PlacedTile::kind) == Some(TileKind::Normal);
        let menhir_forest = forests
            .iter()
            .find(|forest| forest.has_menhir())
            .filter(|_| closed_by_normal && self.decks.deck_size(TileKind::Menhir) > 0);

        if let Some(forest) = menhir_forest {
            self.messages = self.messages.with_closed_forest_with_menhir(player, forest);
            if let Some(tile) = self.drawn_placeable(TileKind::Menhir)? {
                debug!(player = %player, tile = %tile.id, "menhir bonus turn");
                self.tile_to_place = Some(tile);
                self.next_action = NextAction::PlaceTile;
                return Ok(self);
            }
            debug!(player = %player, "no placeable menhir tile, bonus turn lost");
        }

        if let Some(first) = self.players.pop_front() {
            self.players.push_back(first);
        }
        if let Some(tile) = self.drawn_placeable(TileKind::Normal)? {
            self.tile_to_place = Some(tile);
            self.next_action = NextAction::PlaceTile;
            return Ok(self);
        }
        self.with_final_points_counted()
    }

    /// Discard unplaceable tiles from a deck and draw the first placeable one.
    fn drawn_placeable(&mut self, kind: TileKind) -> RulesResult<Option<Tile>> {
        let board = &self.board;
        self.decks = self
            .decks
            .with_top_tile_drawn_until(kind, |tile| board.could_place_tile(tile));
        match self.decks.top_tile(kind).cloned() {
            Some(tile) => {
                self.decks = self.decks.with_top_tile_drawn(kind)?;
                Ok(Some(tile))
            }
            None => Ok(None),
        }
    }

    fn with_final_points_counted(mut self) -> RulesResult<Self> {
        let meadows: Vec<Area<Meadow>> = self.board.meadow_areas().cloned().collect();
        for meadow in &meadows {
            let animals = meadow.animals(self.board.cancelled_animals());
            let tigers = if meadow.zone_with_special_power(SpecialPower::WildFire).is_some() {
                0
            } else {
                tiger_count(&animals)
            };

            let adjacent = match meadow.zone_with_special_power(SpecialPower::PitTrap) {
                Some(pit) => {
                    let pos = self.board.tile_with_id(pit.tile_id())?.pos;
                    Some(self.board.adjacent_meadow(pos, pit.id)?)
                }
                None => None,
            };

            // Deer come in id order; with a pit trap, those out of its reach go first.
            let mut deer: Vec<Animal> = animals.iter().copied().collect();
            if let Some(adjacent) = &adjacent {
                let near = adjacent.animals(&OrdSet::new());
                deer.sort_by_key(|animal| near.contains(animal));
            }
            self.board = self.board.with_more_cancelled_animals(deer_eaten(deer, tigers));

            let cancelled = self.board.cancelled_animals();
            self.messages = self.messages.with_scored_meadow(meadow, cancelled);
            if let Some(adjacent) = &adjacent {
                self.messages = self.messages.with_scored_pit_trap(adjacent, cancelled);
            }
        }

        for system in self.board.river_system_areas() {
            self.messages = self.messages.with_scored_river_system(system);
            if system.zone_with_special_power(SpecialPower::Raft).is_some() {
                self.messages = self.messages.with_scored_raft(system);
            }
        }

        let result = GameResult::from_points(self.players.iter().copied(), &self.messages.points());
        debug!(?result, "game over");
        self.messages = self.messages.with_winners(&result.winners(), result.points());
        self.tile_to_place = None;
        self.next_action = NextAction::EndGame;
        Ok(self)
    }
}
