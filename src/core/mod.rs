//! Core engine types: players, RNG, configuration, intents, errors, state.
//!
//! Everything here is shared by the rule modules. The rules themselves
//! live in `rules`; configuration is data in `RulesConfig`, never constants
//! in the engine.

pub mod config;
pub mod error;
pub mod intent;
pub mod player;
pub mod rng;
pub mod state;

pub use config::RulesConfig;
pub use error::{GameError, SetupError};
pub use intent::{Intent, IntentRecord};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, Phase, TurnStage};
