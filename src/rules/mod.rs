//! Rules engine trait and the faction durak implementation.
//!
//! `RulesEngine` is the single entry point for changing a game: intents go
//! in, new snapshots or rejections come out. `DurakEngine` implements it on
//! top of the leaf modules (`deck`, `roles`, `factions`, `table`, `turn`,
//! `draw`); `detect_outcome` is the win check it runs at every turn
//! boundary.

pub mod durak;
pub mod engine;
pub mod outcome;

pub use durak::DurakEngine;
pub use engine::{GameResult, RulesEngine};
pub use outcome::detect_outcome;
