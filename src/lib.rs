//! # faction-durak
//!
//! Rule engine for a multi-player Durak-style card battle where attacks
//! must chain through factions printed on the cards.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `(state, intent) -> state | rejection`. A
//!    rejected intent never changes the state it was applied to.
//!
//! 2. **N-Player First**: roles, rotations and the draw queue are defined
//!    for any table size the configuration allows.
//!
//! 3. **Configuration Over Constants**: hand size, table capacity, power
//!    scale and the equal-power defense rule live in `RulesConfig`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: snapshots clone in O(1) via `im`, so
//!   every intent works on its own copy.
//!
//! - **Single Writer**: `StateStore` serializes intents for a table with
//!   compare-and-swap versions and publishes each accepted snapshot.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, intents, errors, state
//! - `cards`: Card definitions and the catalog
//! - `deck`: Shuffling and dealing
//! - `roles`: First player, role assignment and rotation
//! - `factions`: Attack-chain faction validation
//! - `table`: Attack/defense slots and the power rule
//! - `turn`: Attack priority, Bito and Pas
//! - `draw`: Draw queue and replenishment
//! - `rules`: RulesEngine trait, win detection, the durak engine
//! - `store`: Versioned snapshot store with subscriptions

pub mod cards;
pub mod core;
pub mod deck;
pub mod draw;
pub mod factions;
pub mod roles;
pub mod rules;
pub mod store;
pub mod table;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    GameError, GameRng, GameState, Intent, IntentRecord, Phase, Player, PlayerId, PlayerMap,
    RulesConfig, SetupError, TurnStage,
};

pub use crate::cards::{CardCatalog, CardDefinition, CardId, FactionId};

pub use crate::factions::{ChainPath, FactionChain};

pub use crate::roles::{FirstPlayer, Role};

pub use crate::rules::{detect_outcome, DurakEngine, GameResult, RulesEngine};

pub use crate::store::{Snapshot, StateStore, StoreError};

pub use crate::table::Table;

pub use crate::turn::{AttackRole, TurnControl};
