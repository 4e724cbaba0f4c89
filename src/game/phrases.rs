//! Message text.
//!
//! The rules never format text themselves. Each scoring event hands the
//! structured facts (scorers, points, counts) to a `PhraseGenerator` and
//! stores whatever string comes back.

use im::OrdSet;
use rustc_hash::FxHashMap;

use crate::core::PlayerColor;
use crate::tiles::AnimalCounts;

/// Turns scoring facts into readable text.
pub trait PhraseGenerator: Send + Sync {
    fn player_name(&self, player: PlayerColor) -> String;

    /// A number of points, e.g. "3 points".
    fn points(&self, points: u32) -> String;

    fn player_closed_forest_with_menhir(&self, player: PlayerColor) -> String;

    fn players_scored_forest(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        mushroom_group_count: u32,
        tile_count: u32,
    ) -> String;

    fn players_scored_river(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        fish_count: u32,
        tile_count: u32,
    ) -> String;

    fn player_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        points: u32,
        animals: &AnimalCounts,
    ) -> String;

    fn player_scored_logboat(&self, scorer: PlayerColor, points: u32, lake_count: u32) -> String;

    fn players_scored_meadow(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        animals: &AnimalCounts,
    ) -> String;

    fn players_scored_river_system(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        fish_count: u32,
    ) -> String;

    fn players_scored_pit_trap(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        animals: &AnimalCounts,
    ) -> String;

    fn players_scored_raft(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        lake_count: u32,
    ) -> String;

    fn players_won(&self, winners: &OrdSet<PlayerColor>, points: u32) -> String;
}

/// Plain English phrases. Players are named after their color unless
/// given a name.
#[derive(Clone, Debug, Default)]
pub struct PlainPhrases {
    names: FxHashMap<PlayerColor, String>,
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn listed(items: Vec<String>) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

fn animals(counts: &AnimalCounts) -> String {
    let mut parts = Vec::new();
    if counts.mammoths > 0 {
        parts.push(plural(counts.mammoths, "mammoth", "mammoths"));
    }
    if counts.aurochs > 0 {
        parts.push(plural(counts.aurochs, "aurochs", "aurochs"));
    }
    if counts.deer > 0 {
        parts.push(plural(counts.deer, "deer", "deer"));
    }
    listed(parts)
}

impl PlainPhrases {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, player: PlayerColor, name: impl Into<String>) -> Self {
        self.names.insert(player, name.into());
        self
    }

    fn names(&self, players: &OrdSet<PlayerColor>) -> String {
        listed(players.iter().map(|&p| self.player_name(p)).collect())
    }

    /// "Red scored 3 points as majority occupant" and the plural form.
    fn scored_as_majority(&self, scorers: &OrdSet<PlayerColor>, points: u32) -> String {
        let role = if scorers.len() == 1 {
            "majority occupant"
        } else {
            "majority occupants"
        };
        format!("{} scored {} as {role}", self.names(scorers), self.points(points))
    }
}

impl PhraseGenerator for PlainPhrases {
    fn player_name(&self, player: PlayerColor) -> String {
        self.names
            .get(&player)
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }

    fn points(&self, points: u32) -> String {
        plural(points, "point", "points")
    }

    fn player_closed_forest_with_menhir(&self, player: PlayerColor) -> String {
        format!(
            "{} closed a forest with a menhir and may place a menhir tile.",
            self.player_name(player)
        )
    }

    fn players_scored_forest(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        mushroom_group_count: u32,
        tile_count: u32,
    ) -> String {
        let mut text = format!(
            "{} of a forest of {}",
            self.scored_as_majority(scorers, points),
            plural(tile_count, "tile", "tiles")
        );
        if mushroom_group_count > 0 {
            text.push_str(&format!(
                " with {}",
                plural(mushroom_group_count, "mushroom group", "mushroom groups")
            ));
        }
        text.push('.');
        text
    }

    fn players_scored_river(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        fish_count: u32,
        tile_count: u32,
    ) -> String {
        let mut text = format!(
            "{} of a river of {}",
            self.scored_as_majority(scorers, points),
            plural(tile_count, "tile", "tiles")
        );
        if fish_count > 0 {
            text.push_str(&format!(" with {fish_count} fish"));
        }
        text.push('.');
        text
    }

    fn player_scored_hunting_trap(
        &self,
        scorer: PlayerColor,
        points: u32,
        animals_caught: &AnimalCounts,
    ) -> String {
        format!(
            "{} scored {} with the hunting trap, catching {}.",
            self.player_name(scorer),
            self.points(points),
            animals(animals_caught)
        )
    }

    fn player_scored_logboat(&self, scorer: PlayerColor, points: u32, lake_count: u32) -> String {
        format!(
            "{} scored {} with the logboat, reaching {}.",
            self.player_name(scorer),
            self.points(points),
            plural(lake_count, "lake", "lakes")
        )
    }

    fn players_scored_meadow(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        animals_held: &AnimalCounts,
    ) -> String {
        format!(
            "{} of a meadow holding {}.",
            self.scored_as_majority(scorers, points),
            animals(animals_held)
        )
    }

    fn players_scored_river_system(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        fish_count: u32,
    ) -> String {
        format!(
            "{} of a river system with {fish_count} fish.",
            self.scored_as_majority(scorers, points)
        )
    }

    fn players_scored_pit_trap(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        animals_near: &AnimalCounts,
    ) -> String {
        format!(
            "{} of a meadow with the pit trap, which holds {} nearby.",
            self.scored_as_majority(scorers, points),
            animals(animals_near)
        )
    }

    fn players_scored_raft(
        &self,
        scorers: &OrdSet<PlayerColor>,
        points: u32,
        lake_count: u32,
    ) -> String {
        format!(
            "{} of a river system with the raft and {}.",
            self.scored_as_majority(scorers, points),
            plural(lake_count, "lake", "lakes")
        )
    }

    fn players_won(&self, winners: &OrdSet<PlayerColor>, points: u32) -> String {
        let verb = if winners.len() == 1 { "wins" } else { "win" };
        format!("{} {verb} with {}.", self.names(winners), self.points(points))
    }
}
