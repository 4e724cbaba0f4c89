//! Result of a finished game.

use im::OrdSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::PlayerColor;

/// Who won, and with how many points.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner { player: PlayerColor, points: u32 },
    /// Several players tied at the top.
    Winners { players: OrdSet<PlayerColor>, points: u32 },
}

impl GameResult {
    /// Decide the result from per-player totals.
    ///
    /// Players missing from `points` have scored nothing. If nobody scored,
    /// every player ties at zero.
    pub fn from_points(
        players: impl IntoIterator<Item = PlayerColor>,
        points: &FxHashMap<PlayerColor, u32>,
    ) -> Self {
        let players: OrdSet<PlayerColor> = players.into_iter().collect();
        let best = players
            .iter()
            .map(|p| points.get(p).copied().unwrap_or(0))
            .max()
            .unwrap_or(0);
        let winners: OrdSet<PlayerColor> = players
            .into_iter()
            .filter(|p| points.get(p).copied().unwrap_or(0) == best)
            .collect();

        if winners.len() == 1 {
            if let Some(&player) = winners.get_min() {
                return GameResult::Winner { player, points: best };
            }
        }
        GameResult::Winners { players: winners, points: best }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerColor) -> bool {
        match self {
            GameResult::Winner { player: p, .. } => *p == player,
            GameResult::Winners { players, .. } => players.contains(&player),
        }
    }

    #[must_use]
    pub fn winners(&self) -> OrdSet<PlayerColor> {
        match self {
            GameResult::Winner { player, .. } => OrdSet::unit(*player),
            GameResult::Winners { players, .. } => players.clone(),
        }
    }

    /// Winning total.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            GameResult::Winner { points, .. } | GameResult::Winners { points, .. } => *points,
        }
    }
}
