//! Rules configuration.
//!
//! The standard game uses a 25×25 board (reach 12 around the origin) and
//! gives every player 5 pawns and 3 huts. Variants configure these values
//! at startup through `RulesConfig` rather than touching the rules code.

use serde::{Deserialize, Serialize};

use crate::tiles::OccupantKind;

/// Default distance from the origin to the board edge.
pub const DEFAULT_REACH: i32 = 12;

/// Static parameters of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cells between the origin and each edge of the board.
    pub reach: i32,

    /// Pawns each player owns.
    pub pawns_per_player: u8,

    /// Huts each player owns.
    pub huts_per_player: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            reach: DEFAULT_REACH,
            pawns_per_player: 5,
            huts_per_player: 3,
        }
    }
}

impl RulesConfig {
    /// Set the board reach.
    #[must_use]
    pub fn with_reach(mut self, reach: i32) -> Self {
        assert!(reach >= 1, "Board reach must be at least 1");
        self.reach = reach;
        self
    }

    /// Set the number of pawns per player.
    #[must_use]
    pub fn with_pawns(mut self, pawns: u8) -> Self {
        self.pawns_per_player = pawns;
        self
    }

    /// Set the number of huts per player.
    #[must_use]
    pub fn with_huts(mut self, huts: u8) -> Self {
        self.huts_per_player = huts;
        self
    }

    /// Pieces of the given kind each player starts with.
    #[must_use]
    pub fn occupants_per_player(&self, kind: OccupantKind) -> u8 {
        match kind {
            OccupantKind::Pawn => self.pawns_per_player,
            OccupantKind::Hut => self.huts_per_player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_standard_game() {
        let config = RulesConfig::default();
        assert_eq!(config.reach, 12);
        assert_eq!(config.occupants_per_player(OccupantKind::Pawn), 5);
        assert_eq!(config.occupants_per_player(OccupantKind::Hut), 3);
    }

    #[test]
    fn test_builder() {
        let config = RulesConfig::default().with_reach(3).with_pawns(2).with_huts(0);
        assert_eq!(config.reach, 3);
        assert_eq!(config.pawns_per_player, 2);
        assert_eq!(config.huts_per_player, 0);
    }

    #[test]
    #[should_panic(expected = "Board reach must be at least 1")]
    fn test_zero_reach() {
        let _ = RulesConfig::default().with_reach(0);
    }

    #[test]
    fn test_config_serde() {
        let config = RulesConfig::default().with_huts(1);
        let json = serde_json::to_string(&config).unwrap();
        let back: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
