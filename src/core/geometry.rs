//! Board geometry: positions, compass directions and quarter-turn rotations.
//!
//! ## Coordinates
//!
//! `x` grows towards the east and `y` grows towards the south, so the
//! northern neighbor of `(0, 0)` is `(0, -1)`.
//!
//! ## Rotations
//!
//! Rotations are clockwise quarter turns. A tile placed with rotation `r`
//! shows, in absolute direction `d`, the side it declares at `d` rotated by
//! `-r`.

use serde::{Deserialize, Serialize};

/// A cell on the board grid.
///
/// Ordering is by `x` then `y`, which is the order the action codec uses
/// to index insertion positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// The center of the board, where the start tile goes.
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by the given offsets.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The adjacent cell in the given direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        match direction {
            Direction::N => self.translated(0, -1),
            Direction::E => self.translated(1, 0),
            Direction::S => self.translated(0, 1),
            Direction::W => self.translated(-1, 0),
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction, in clockwise order starting from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Position in `ALL`; also the index of the matching side of a tile.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        Self::ALL[(self.index() + rotation.quarter_turns_cw()) % 4]
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotated(Rotation::HalfTurn)
    }
}

/// Clockwise rotation by a whole number of quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Right,
    HalfTurn,
    Left,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Right,
        Rotation::HalfTurn,
        Rotation::Left,
    ];

    /// Build from a quarter-turn count; only the low two bits matter.
    #[must_use]
    pub const fn from_quarter_turns(turns: usize) -> Self {
        Self::ALL[turns % 4]
    }

    #[must_use]
    pub const fn quarter_turns_cw(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn degrees_cw(self) -> u32 {
        self as u32 * 90
    }

    #[must_use]
    pub const fn add(self, other: Rotation) -> Self {
        Self::from_quarter_turns(self.quarter_turns_cw() + other.quarter_turns_cw())
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self::from_quarter_turns(4 - self.quarter_turns_cw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let p = Pos::new(2, -3);
        assert_eq!(p.neighbor(Direction::N), Pos::new(2, -4));
        assert_eq!(p.neighbor(Direction::E), Pos::new(3, -3));
        assert_eq!(p.neighbor(Direction::S), Pos::new(2, -2));
        assert_eq!(p.neighbor(Direction::W), Pos::new(1, -3));
    }

    #[test]
    fn test_pos_order_is_x_then_y() {
        let mut positions = vec![Pos::new(1, -1), Pos::new(0, 5), Pos::new(0, -2), Pos::new(-1, 0)];
        positions.sort();
        assert_eq!(
            positions,
            vec![Pos::new(-1, 0), Pos::new(0, -2), Pos::new(0, 5), Pos::new(1, -1)]
        );
    }

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::N.rotated(Rotation::Right), Direction::E);
        assert_eq!(Direction::W.rotated(Rotation::Right), Direction::N);
        assert_eq!(Direction::S.rotated(Rotation::Left), Direction::E);
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.rotated(Rotation::None), d);
        }
        assert_eq!(Direction::E.opposite(), Direction::W);
    }

    #[test]
    fn test_rotation_arithmetic() {
        assert_eq!(Rotation::Right.add(Rotation::Left), Rotation::None);
        assert_eq!(Rotation::HalfTurn.add(Rotation::HalfTurn), Rotation::None);
        assert_eq!(Rotation::Right.negated(), Rotation::Left);
        assert_eq!(Rotation::None.negated(), Rotation::None);
        assert_eq!(Rotation::Left.degrees_cw(), 270);
        for r in Rotation::ALL {
            assert_eq!(r.add(r.negated()), Rotation::None);
            assert_eq!(Rotation::from_quarter_turns(r.quarter_turns_cw()), r);
        }
    }

    #[test]
    fn test_pos_serde() {
        let p = Pos::new(-4, 7);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<Pos>(&json).unwrap(), p);
    }
}
