//! Turns, messages and phrases.
//!
//! `GameState` drives a game from the start tile to the final count.
//! Scoring events land in its `MessageBoard`, worded by a
//! `PhraseGenerator` supplied by the caller.

pub mod phrases;
pub mod messages;
pub mod state;

pub use phrases::{PhraseGenerator, PlainPhrases};
pub use messages::{Message, MessageBoard};
pub use state::{GameState, NextAction};
