//! The bounded grid of placed tiles.

pub mod grid;

pub use grid::Board;
