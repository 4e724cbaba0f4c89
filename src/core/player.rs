//! Player colors.
//!
//! A game seats between two and five players, each identified by the color
//! of their pieces. Colors double as stable player identifiers: ordering is
//! the seating order used when sorting area occupants.

use serde::{Deserialize, Serialize};

/// Player identifier, one per piece color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl PlayerColor {
    pub const ALL: [PlayerColor; 5] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Purple,
    ];

    /// Get the 0-based color index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The first `player_count` colors, in order.
    ///
    /// ```
    /// use stoneage_tiles::core::PlayerColor;
    ///
    /// let players: Vec<_> = PlayerColor::first(3).collect();
    /// assert_eq!(players, vec![PlayerColor::Red, PlayerColor::Blue, PlayerColor::Green]);
    /// ```
    pub fn first(player_count: usize) -> impl Iterator<Item = PlayerColor> {
        Self::ALL.into_iter().take(player_count)
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Green => "Green",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Purple => "Purple",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, color) in PlayerColor::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_first_caps_at_five() {
        assert_eq!(PlayerColor::first(2).count(), 2);
        assert_eq!(PlayerColor::first(9).count(), 5);
    }

    #[test]
    fn test_ordering_follows_seating() {
        assert!(PlayerColor::Red < PlayerColor::Blue);
        assert!(PlayerColor::Yellow < PlayerColor::Purple);
        assert_eq!(PlayerColor::Green.to_string(), "Green");
    }
}
